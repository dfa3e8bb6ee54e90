//! Diesel row models for task and decision-log persistence.

use super::schema::{logs, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Store-assigned task handle.
    pub id: i64,
    /// User-entered task text.
    pub text: String,
    /// Urgency classification.
    pub is_urgent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Optional done-definition.
    pub done_definition: Option<String>,
}

/// Insert model for task records; the handle is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// User-entered task text.
    pub text: String,
    /// Urgency classification.
    pub is_urgent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Optional done-definition.
    pub done_definition: Option<String>,
}

/// Query result row for decision log entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LogRow {
    /// Store-assigned log handle.
    pub id: i64,
    /// Referenced task handle.
    pub task_id: i64,
    /// Selection timestamp.
    pub chosen_at: DateTime<Utc>,
    /// Selection method.
    pub method: String,
    /// Optional execution-finished timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for decision log entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = logs)]
pub struct NewLogRow {
    /// Referenced task handle.
    pub task_id: i64,
    /// Selection timestamp.
    pub chosen_at: DateTime<Utc>,
    /// Selection method.
    pub method: String,
    /// Optional execution-finished timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

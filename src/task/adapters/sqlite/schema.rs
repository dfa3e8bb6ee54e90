//! Diesel schema for task and decision-log persistence.

diesel::table! {
    /// Task records captured by the session flow.
    tasks (id) {
        /// Store-assigned task handle.
        id -> BigInt,
        /// User-entered task text.
        text -> Text,
        /// Urgency classification decided during triage.
        is_urgent -> Bool,
        /// Creation timestamp (insertion order).
        created_at -> TimestamptzSqlite,
        /// Lifecycle status.
        status -> Text,
        /// Optional done-definition attached at the execution gate.
        done_definition -> Nullable<Text>,
    }
}

diesel::table! {
    /// Append-only decision log entries.
    logs (id) {
        /// Store-assigned log handle.
        id -> BigInt,
        /// Referenced task handle.
        task_id -> BigInt,
        /// Selection timestamp.
        chosen_at -> TimestamptzSqlite,
        /// Selection method.
        method -> Text,
        /// Optional execution-finished timestamp.
        completed_at -> Nullable<TimestamptzSqlite>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, logs);

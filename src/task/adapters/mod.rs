//! Concrete store adapters.

pub mod memory;
pub mod sqlite;

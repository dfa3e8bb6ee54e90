//! Task capture and decision logging.
//!
//! This module owns the durable side of the session flow: validated task
//! records, their forward status machine, and the append-only decision log.
//! It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

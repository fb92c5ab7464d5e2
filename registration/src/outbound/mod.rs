//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user storage standing in for a database.
//!
//! Adapters translate between domain types and their storage representation
//! and contain no registration rules.

pub mod memory;

//! Foundation types for ChangeTrail.
//!
//! This crate models the audit-log entry envelope served by the admin and
//! user logs APIs, and the extraction of the before/after snapshot pair that
//! the diff engine consumes. The envelope schema is deliberately loose:
//! everything beyond the well-known fields is kept as opaque JSON.
//!
//! # Key Types
//!
//! - [`LogEntry`] — One audit-log entry (`_id`, `action`, `timestamp`, actor,
//!   resource, `details`)
//! - [`ComparisonPair`] — The two snapshots (`before` / `after`) pulled out of
//!   an entry's `details` payload
//! - [`LogError`] — Payload decoding failures

pub mod entry;
pub mod error;

pub use entry::{entries_from_value, entry_from_value, ComparisonPair, LogEntry};
pub use error::LogError;

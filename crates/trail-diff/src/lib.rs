//! Object-diff engine for ChangeTrail.
//!
//! Walks two JSON snapshots in lock-step and produces an ordered list of
//! structural differences, each located by a dot/bracket path string. The
//! engine is pure: no I/O, no mutation of inputs, deterministic output for
//! the same pair of snapshots. Inputs are `serde_json::Value`s, which are
//! finite and acyclic by construction.
//!
//! # Key Types
//!
//! - [`ObjectDiff`] / [`ChangeRecord`] -- Structural diff of two JSON values
//! - [`values_equal`] -- The recursive equality predicate the traversal uses
//! - [`TextDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level diff of
//!   multi-line string fields

pub mod equality;
pub mod object_diff;
pub mod path;
pub mod text_diff;

pub use equality::values_equal;
pub use object_diff::{diff, ChangeRecord, ObjectDiff};
pub use text_diff::{diff_text, DiffHunk, DiffLine, TextDiff};

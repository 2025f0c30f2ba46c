//! Store layer: the command surface over the category/note tree.
//!
//! # Responsibility
//! - Apply user commands to the in-memory tree.
//! - Persist one whole-tree snapshot per successful command.
//!
//! # Invariants
//! - Commands are atomic: a command either fully applies or leaves the
//!   tree unchanged.
//! - Validation failures are silent no-ops; the caller surfaces them.

pub mod notes_store;

//! Typed rows for the project store.
//!
//! # Responsibility
//! - Give callers named fields instead of positional tuples.
//! - Hold the allow-list of columns that may be updated by name.
//!
//! # Invariants
//! - Row structs mirror table columns one-to-one; nullable columns are `Option`.

pub mod project;
pub mod reference;
pub mod user;

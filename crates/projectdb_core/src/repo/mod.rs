//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL text inside the core persistence boundary.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `InvalidColumn`)
//!   alongside engine errors, which pass through unchanged.
//! - Each repository call is one transaction on its own connection.

pub mod project_repo;
pub mod user_repo;

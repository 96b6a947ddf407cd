//! Domain types and business rules for the Stitchdesk order platform.
//!
//! This crate is pure: no I/O, no database access. The `db` and `api`
//! crates depend on it for the shared error taxonomy, role and status
//! enumerations, and the order-sheet arithmetic rules.

pub mod error;
pub mod order_type;
pub mod outcome;
pub mod roles;
pub mod sizes;
pub mod types;
pub mod workflow;

//! Clause containers: one immutable value per statement kind holding the
//! contents of each of its clauses.
//!
//! Mutators take `&self` and return a new container, so any number of
//! datasets can branch from the same container without affecting each
//! other.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

pub use delete::DeleteClauses;
pub use insert::InsertClauses;
pub use select::SelectClauses;
pub use truncate::{TruncateClauses, TruncateOptions};
pub use update::UpdateClauses;

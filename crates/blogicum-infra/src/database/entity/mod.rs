//! SeaORM entities mirroring the domain model.
//!
//! Relation definitions carry the ownership semantics: deleting a user
//! or post cascades to its dependents, while deleting a category or
//! location merely nulls the reference on affected posts.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;

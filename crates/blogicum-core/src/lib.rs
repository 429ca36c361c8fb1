//! # Blogicum Core
//!
//! The domain layer of the Blogicum blogging service.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: the entities, the post visibility filter, the ownership
//! gate, feed scoping, pagination math, and the ports that the
//! infrastructure layer implements.

pub mod access;
pub mod domain;
pub mod error;
pub mod feed;
pub mod pagination;
pub mod ports;
pub mod visibility;

pub use error::RepoError;

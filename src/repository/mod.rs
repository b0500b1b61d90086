//! Typed access to a single store collection.
//!
//! A [`TypedRepository`] binds a model type to one (database, collection)
//! pair on a store connection and exposes read and insert operations in
//! terms of the model. Models cross the store boundary through the
//! [`DocumentModel`] trait.

mod model;
mod typed_repository;

pub use model::*;
pub use typed_repository::*;

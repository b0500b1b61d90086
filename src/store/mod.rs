//! The store connection boundary.
//!
//! Everything above this module is store-agnostic: a
//! [`crate::repository::TypedRepository`] talks to its backend only through
//! the [`StoreConnection`] trait defined here. Implementations adapt a
//! concrete document store (a remote server, an embedded engine, an
//! in-memory double) behind the trait and are shared through a
//! [`StoreHandle`].

mod connection;
mod cursor;

pub use connection::*;
pub use cursor::*;

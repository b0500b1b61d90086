//! Raw document representation exchanged with the store.
//!
//! This module provides the untyped shapes the facade translates to and
//! from: [`Document`] (an ordered key-value record), [`Value`] (the field
//! value variants), and [`ObjectId`] (the store-assigned 12-byte document
//! identifier). The [`crate::doc!`] macro builds documents inline.
//!
//! Documents here are wire payloads and query predicates; the facade never
//! interprets or validates their content.

mod document;
mod object_id;
mod value;

pub use document::*;
pub use object_id::*;
pub use value::*;

/// The store's implicit primary-key field present on every stored document.
pub const DOC_ID: &str = "_id";

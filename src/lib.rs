//! # docrepo - Typed Repository Facade for Document Stores
//!
//! docrepo gives an application a typed, async read/insert surface over an
//! external document store. A [`repository::TypedRepository`] binds a model
//! type to one database and collection on a shared connection; all queries,
//! options, and documents are passed through to the store uninterpreted.
//!
//! ## Key Ideas
//!
//! - **Typed boundary**: models cross the store boundary through the
//!   [`repository::DocumentModel`] trait, never as raw documents
//! - **Opaque queries**: a [`filter::Filter`] wraps a predicate document the
//!   store evaluates; the facade only builds and carries it
//! - **Store-assigned ids**: every insert is acknowledged with a 12-byte
//!   [`document::ObjectId`], narrowed fallibly from the untyped wire value
//! - **Single error channel**: every failure surfaces as an
//!   [`errors::RepoError`] with a machine-checkable [`errors::ErrorKind`]
//! - **Async and cancellable**: operations are futures; dropping one
//!   abandons the call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docrepo::repository::TypedRepository;
//! use docrepo::filter::field;
//!
//! # async fn example(connection: docrepo::store::StoreHandle) -> docrepo::errors::RepoResult<()> {
//! let repository: TypedRepository<Note> =
//!     TypedRepository::new(connection, "app", "notes");
//!
//! // Insert a model; the store assigns the id
//! let record = repository.insert_one(&Note { val: 1 }).await?;
//! println!("stored as {}", record.id());
//!
//! // Fetch it back
//! let note = repository.find_by_id(&record.id().to_hex()).await?;
//!
//! // Query by field
//! let notes = repository.find_many(field("val").gt(0)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - Raw documents, values, and object ids
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query predicate builders
//! - [`options`] - Per-operation find and insert options
//! - [`repository`] - The typed repository and model trait
//! - [`store`] - The store connection boundary

pub mod document;
pub mod errors;
pub mod filter;
pub mod options;
pub mod repository;
pub mod store;

use crate::document::{Document, Value};
use crate::errors::RepoResult;
use crate::filter::Filter;
use crate::options::{FindOptions, InsertManyOptions, InsertOptions};
use crate::store::DocumentCursor;
use async_trait::async_trait;
use std::sync::Arc;

/// A shared handle to an open store connection.
///
/// Cloning the handle is cheap; all repositories built from it share the
/// same underlying connection.
pub type StoreHandle = Arc<dyn StoreConnection>;

/// The contract a document store backend fulfills.
///
/// Every operation addresses a (database, collection) pair; the connection
/// owns no default database. Filters, options, and documents are passed
/// through uninterpreted, so a backend is free to reject shapes it does not
/// support.
///
/// All methods are cancel-safe in the usual async sense: dropping a returned
/// future abandons the operation, though a write already dispatched to the
/// backend may still take effect there.
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Returns the first document matching `filter`, or `None` if nothing
    /// matches.
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> RepoResult<Option<Document>>;

    /// Returns a cursor over every document matching `filter`.
    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> RepoResult<DocumentCursor>;

    /// Writes one document and returns the store's acknowledgment of the
    /// id it assigned.
    ///
    /// The acknowledgment is an untyped [`Value`] because the backend wire
    /// protocol does not commit to an id shape; callers narrow it.
    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
        options: &InsertOptions,
    ) -> RepoResult<Value>;

    /// Writes a batch of documents and returns the assigned ids in input
    /// order, one per document.
    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
        options: &InsertManyOptions,
    ) -> RepoResult<Vec<Value>>;
}

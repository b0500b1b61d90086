use async_trait::async_trait;
use docrepo::document::{Document, ObjectId, Value, DOC_ID};
use docrepo::errors::{ErrorKind, RepoError, RepoResult};
use docrepo::filter::Filter;
use docrepo::options::{FindOptions, InsertManyOptions, InsertOptions};
use docrepo::store::{DocumentCursor, StoreConnection};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[ctor::ctor]
fn init() {
    colog::init();
}

/// An in-memory store double backing the integration tests.
///
/// Evaluates top-level equality predicates only, which is all the facade
/// itself ever builds. A string predicate value matches a stored object id
/// whose hex form equals it, mirroring the id coercion a real store applies
/// on its side of the wire.
#[derive(Default)]
pub struct MemoryConnection {
    data: RwLock<HashMap<(String, String), Vec<Document>>>,
    fail_next: AtomicBool,
}

impl MemoryConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(MemoryConnection::default())
    }

    /// Pre-populates a collection with raw documents.
    pub fn seed(&self, database: &str, collection: &str, documents: Vec<Document>) {
        self.data
            .write()
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .extend(documents);
    }

    /// Makes the next operation fail with a transport error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn stored(&self, database: &str, collection: &str) -> Vec<Document> {
        self.data
            .read()
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn check_transport(&self) -> RepoResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(RepoError::new(
                "connection refused",
                ErrorKind::ConnectionError,
            ));
        }
        Ok(())
    }

    fn matching(&self, database: &str, collection: &str, filter: &Filter) -> Vec<Document> {
        self.data
            .read()
            .get(&(database.to_string(), collection.to_string()))
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .as_document()
        .iter()
        .all(|(key, expected)| values_equal(&document.get(key), expected))
}

fn values_equal(stored: &Value, expected: &Value) -> bool {
    match (stored, expected) {
        (Value::ObjectId(id), Value::String(hex)) => id.to_hex() == *hex,
        _ => stored == expected,
    }
}

fn assign_id(mut document: Document) -> (Document, ObjectId) {
    let id = ObjectId::new();
    document.put(DOC_ID, id);
    (document, id)
}

#[async_trait]
impl StoreConnection for MemoryConnection {
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        _options: &FindOptions,
    ) -> RepoResult<Option<Document>> {
        self.check_transport()?;
        Ok(self.matching(database, collection, filter).into_iter().next())
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> RepoResult<DocumentCursor> {
        self.check_transport()?;
        let mut documents = self.matching(database, collection, filter);
        if let Some(skip) = options.skip {
            documents = documents.split_off((skip as usize).min(documents.len()));
        }
        if let Some(limit) = options.limit {
            documents.truncate(limit as usize);
        }
        Ok(DocumentCursor::from_documents(documents))
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
        _options: &InsertOptions,
    ) -> RepoResult<Value> {
        self.check_transport()?;
        let (document, id) = assign_id(document);
        self.data
            .write()
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .push(document);
        Ok(Value::ObjectId(id))
    }

    async fn insert_many(
        &self,
        database: &str,
        collection: &str,
        documents: Vec<Document>,
        _options: &InsertManyOptions,
    ) -> RepoResult<Vec<Value>> {
        self.check_transport()?;
        let mut ids = Vec::with_capacity(documents.len());
        let mut stored = Vec::with_capacity(documents.len());
        for document in documents {
            let (document, id) = assign_id(document);
            ids.push(Value::ObjectId(id));
            stored.push(document);
        }
        self.data
            .write()
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .extend(stored);
        Ok(ids)
    }
}

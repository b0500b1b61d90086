use crate::document::Document;
use crate::errors::RepoResult;
use async_trait::async_trait;

/// Backend-side iteration over a find result.
///
/// A store implementation returns one of these from
/// [`crate::store::StoreConnection::find`]. The provider owns whatever
/// backend state the iteration needs (a network cursor, a snapshot, a
/// buffered batch) and surfaces transport failures mid-stream as errors.
#[async_trait]
pub trait DocumentCursorProvider: Send {
    /// Exhausts the cursor and returns every remaining document.
    async fn drain_all(&mut self) -> RepoResult<Vec<Document>>;
}

/// A cursor over the documents matched by a find operation.
///
/// The cursor is consumed by draining it fully; partial iteration is not
/// part of this surface. A query that matches nothing drains to an empty
/// vector, which is not an error.
pub struct DocumentCursor {
    inner: Box<dyn DocumentCursorProvider>,
}

impl DocumentCursor {
    /// Wraps a backend cursor provider.
    pub fn new(provider: Box<dyn DocumentCursorProvider>) -> Self {
        DocumentCursor { inner: provider }
    }

    /// Creates a cursor over an already-materialized batch. Useful for
    /// stores that buffer results up front and for test doubles.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        DocumentCursor {
            inner: Box::new(BufferedCursor {
                documents: Some(documents),
            }),
        }
    }

    /// Consumes the cursor and returns all matched documents.
    pub async fn drain_all(mut self) -> RepoResult<Vec<Document>> {
        self.inner.drain_all().await
    }
}

struct BufferedCursor {
    documents: Option<Vec<Document>>,
}

#[async_trait]
impl DocumentCursorProvider for BufferedCursor {
    async fn drain_all(&mut self) -> RepoResult<Vec<Document>> {
        Ok(self.documents.take().unwrap_or_default())
    }
}

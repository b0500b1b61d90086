use crate::document::{ObjectId, Value};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::filter::{by_id, Filter};
use crate::options::{FindOptions, InsertManyOptions, InsertOptions};
use crate::repository::DocumentModel;
use crate::store::StoreHandle;
use std::marker::PhantomData;

/// The outcome of inserting one model.
///
/// Pairs the store-assigned [`ObjectId`] with a borrow of the model it was
/// assigned to. In a batch insert the pairing is positional: the store
/// acknowledges ids in input order and the repository zips them back onto
/// the inputs.
#[derive(Debug)]
pub struct InsertRecord<'a, M> {
    id: ObjectId,
    base: &'a M,
}

impl<'a, M> InsertRecord<'a, M> {
    /// The id the store assigned to the inserted document.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The model this insert was performed for.
    pub fn base(&self) -> &'a M {
        self.base
    }
}

impl<M> Clone for InsertRecord<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for InsertRecord<'_, M> {}

/// A typed read/insert surface over one store collection.
///
/// The repository binds a model type `M` to a (database, collection) pair on
/// a shared store connection. All translation between `M` and the raw
/// document form happens here through [`DocumentModel`]; everything else is
/// passed through to the connection uninterpreted.
///
/// Cloning a repository is cheap and yields another handle onto the same
/// collection.
///
/// # Examples
///
/// ```rust,ignore
/// let repository: TypedRepository<Note> =
///     TypedRepository::new(connection, "app", "notes");
///
/// let record = repository.insert_one(&note).await?;
/// let fetched = repository.find_by_id(&record.id().to_hex()).await?;
/// ```
pub struct TypedRepository<M> {
    connection: StoreHandle,
    database: String,
    collection: String,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for TypedRepository<M> {
    fn clone(&self) -> Self {
        TypedRepository {
            connection: self.connection.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> TypedRepository<M>
where
    M: DocumentModel + Send + Sync,
{
    /// Binds a repository to a collection on the given connection.
    ///
    /// No store round-trip happens here; a missing database or collection
    /// surfaces when an operation first touches it.
    pub fn new(
        connection: StoreHandle,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        TypedRepository {
            connection,
            database: database.into(),
            collection: collection.into(),
            _model: PhantomData,
        }
    }

    /// The database this repository is bound to.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The collection this repository is bound to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fetches the document whose primary key equals `id`.
    ///
    /// The id is matched verbatim against the store's `_id` field; no
    /// coercion is applied on this side.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`] if no document has this id.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<M> {
        self.find_by_id_with_options(id, &FindOptions::default())
            .await
    }

    /// Same as [`TypedRepository::find_by_id`] with explicit find options.
    pub async fn find_by_id_with_options(
        &self,
        id: &str,
        options: &FindOptions,
    ) -> RepoResult<M> {
        self.find_one_with_options(by_id(id), options).await
    }

    /// Fetches the first document matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`] if nothing matches. A query that is
    /// expected to match zero or more documents belongs on
    /// [`TypedRepository::find_many`] instead.
    pub async fn find_one(&self, filter: Filter) -> RepoResult<M> {
        self.find_one_with_options(filter, &FindOptions::default())
            .await
    }

    /// Same as [`TypedRepository::find_one`] with explicit find options.
    pub async fn find_one_with_options(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> RepoResult<M> {
        let found = self
            .connection
            .find_one(&self.database, &self.collection, &filter, options)
            .await?;

        let document = found.ok_or_else(|| {
            log::error!(
                "no document matched the filter in {}.{}",
                self.database,
                self.collection
            );
            RepoError::new("no document matched the filter", ErrorKind::NotFound)
        })?;

        M::from_document(&document)
    }

    /// Fetches every document matching `filter`.
    ///
    /// The underlying cursor is drained fully before any model is revived.
    /// Zero matches is not an error; the result is an empty vector.
    pub async fn find_many(&self, filter: Filter) -> RepoResult<Vec<M>> {
        self.find_many_with_options(filter, &FindOptions::default())
            .await
    }

    /// Same as [`TypedRepository::find_many`] with explicit find options.
    pub async fn find_many_with_options(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> RepoResult<Vec<M>> {
        let cursor = self
            .connection
            .find(&self.database, &self.collection, &filter, options)
            .await?;

        let documents = cursor.drain_all().await?;

        let mut models = Vec::with_capacity(documents.len());
        for document in &documents {
            models.push(M::from_document(document)?);
        }
        Ok(models)
    }

    /// Inserts one model and returns it paired with the id the store
    /// assigned.
    pub async fn insert_one<'a>(&self, model: &'a M) -> RepoResult<InsertRecord<'a, M>> {
        self.insert_one_with_options(model, &InsertOptions::default())
            .await
    }

    /// Same as [`TypedRepository::insert_one`] with explicit insert options.
    pub async fn insert_one_with_options<'a>(
        &self,
        model: &'a M,
        options: &InsertOptions,
    ) -> RepoResult<InsertRecord<'a, M>> {
        let document = model.to_document()?;

        let acknowledged = self
            .connection
            .insert_one(&self.database, &self.collection, document, options)
            .await?;

        let id = narrow_inserted_id(acknowledged)?;
        Ok(InsertRecord { id, base: model })
    }

    /// Inserts a batch of models in one store round-trip.
    ///
    /// The returned records pair each input model with its assigned id,
    /// in input order. An empty batch is a no-op that returns an empty
    /// vector without touching the store.
    pub async fn insert_many<'a>(&self, models: &'a [M]) -> RepoResult<Vec<InsertRecord<'a, M>>> {
        self.insert_many_with_options(models, &InsertManyOptions::default())
            .await
    }

    /// Same as [`TypedRepository::insert_many`] with explicit insert options.
    pub async fn insert_many_with_options<'a>(
        &self,
        models: &'a [M],
        options: &InsertManyOptions,
    ) -> RepoResult<Vec<InsertRecord<'a, M>>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::with_capacity(models.len());
        for model in models {
            documents.push(model.to_document()?);
        }

        let acknowledged = self
            .connection
            .insert_many(&self.database, &self.collection, documents, options)
            .await?;

        if acknowledged.len() != models.len() {
            log::error!(
                "store acknowledged {} ids for {} inserted documents in {}.{}",
                acknowledged.len(),
                models.len(),
                self.database,
                self.collection
            );
            return Err(RepoError::new(
                &format!(
                    "store acknowledged {} ids for {} inserted documents",
                    acknowledged.len(),
                    models.len()
                ),
                ErrorKind::ObjectMappingError,
            ));
        }

        let mut records = Vec::with_capacity(models.len());
        for (value, model) in acknowledged.into_iter().zip(models) {
            let id = narrow_inserted_id(value)?;
            records.push(InsertRecord { id, base: model });
        }
        Ok(records)
    }
}

// The wire acknowledgment is untyped; anything other than an object id is
// an error rather than a silent zero id.
fn narrow_inserted_id(acknowledged: Value) -> RepoResult<ObjectId> {
    match acknowledged {
        Value::ObjectId(id) => Ok(id),
        other => {
            log::error!("store acknowledged an inserted id of unexpected shape: {other}");
            Err(RepoError::new(
                &format!("inserted id is not an object id: {other}"),
                ErrorKind::ObjectMappingError,
            ))
        }
    }
}

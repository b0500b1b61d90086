use crate::document::Document;
use crate::errors::RepoResult;

/// Conversion between a model type and its raw [`Document`] form.
///
/// A repository serializes models through [`DocumentModel::to_document`]
/// before handing them to the store, and revives fetched documents through
/// [`DocumentModel::from_document`]. Both directions are fallible; a failure
/// surfaces from the repository as an object-mapping error.
///
/// # Examples
///
/// ```rust,ignore
/// struct Note {
///     val: i32,
/// }
///
/// impl DocumentModel for Note {
///     fn to_document(&self) -> RepoResult<Document> {
///         Ok(doc! { val: (self.val) })
///     }
///
///     fn from_document(document: &Document) -> RepoResult<Self> {
///         let val = document.get("val").as_i32().copied().ok_or_else(|| {
///             RepoError::new("missing field 'val'", ErrorKind::ObjectMappingError)
///         })?;
///         Ok(Note { val })
///     }
/// }
/// ```
pub trait DocumentModel: Sized {
    /// Serializes the model into its raw document form.
    fn to_document(&self) -> RepoResult<Document>;

    /// Revives a model from a document fetched from the store.
    fn from_document(document: &Document) -> RepoResult<Self>;
}

// Raw documents pass through unchanged, so a repository can be used
// untyped.
impl DocumentModel for Document {
    fn to_document(&self) -> RepoResult<Document> {
        Ok(self.clone())
    }

    fn from_document(document: &Document) -> RepoResult<Self> {
        Ok(document.clone())
    }
}

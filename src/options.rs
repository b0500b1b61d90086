//! Per-operation options forwarded to the store.
//!
//! Options are carried alongside a query or write and handed to the store
//! connection uninterpreted. A store implementation is free to honor or
//! ignore any of them.

/// Sort direction for a field in [`FindOptions::sort`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Options carried by a find operation.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::options::{order_by, SortOrder};
///
/// let options = order_by("score", SortOrder::Descending)
///     .skip(10)
///     .limit(20);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindOptions {
    /// Field names to project; `None` returns full documents.
    pub projection: Option<Vec<String>>,
    /// Sort specification applied in order.
    pub sort: Vec<(String, SortOrder)>,
    /// Number of matching documents to skip.
    pub skip: Option<u64>,
    /// Maximum number of documents to return.
    pub limit: Option<u64>,
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Restricts returned documents to the named fields.
    pub fn project(mut self, fields: Vec<String>) -> Self {
        self.projection = Some(fields);
        self
    }

    /// Appends a sort key.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }

    /// Skips the first `count` matching documents.
    pub fn skip(mut self, count: u64) -> Self {
        self.skip = Some(count);
        self
    }

    /// Caps the number of returned documents.
    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }
}

/// Creates a [`FindOptions`] sorted by the given field.
pub fn order_by(field: impl Into<String>, order: SortOrder) -> FindOptions {
    FindOptions::new().sort(field, order)
}

/// Creates a [`FindOptions`] that skips the first `count` documents.
pub fn skip_by(count: u64) -> FindOptions {
    FindOptions::new().skip(count)
}

/// Creates a [`FindOptions`] capped at `count` documents.
pub fn limit_to(count: u64) -> FindOptions {
    FindOptions::new().limit(count)
}

/// Options carried by a single-document insert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertOptions {
    /// Asks the store to skip document-level validation it would
    /// otherwise apply.
    pub bypass_validation: bool,
    /// Free-form comment attached to the operation for store-side
    /// diagnostics.
    pub comment: Option<String>,
}

impl InsertOptions {
    pub fn new() -> Self {
        InsertOptions::default()
    }

    pub fn bypass_validation(mut self, bypass: bool) -> Self {
        self.bypass_validation = bypass;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Options carried by a batch insert.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertManyOptions {
    /// When true the store writes documents in input order and stops at
    /// the first failure.
    pub ordered: bool,
    /// Asks the store to skip document-level validation it would
    /// otherwise apply.
    pub bypass_validation: bool,
    /// Free-form comment attached to the operation for store-side
    /// diagnostics.
    pub comment: Option<String>,
}

impl Default for InsertManyOptions {
    fn default() -> Self {
        InsertManyOptions {
            ordered: true,
            bypass_validation: false,
            comment: None,
        }
    }
}

impl InsertManyOptions {
    pub fn new() -> Self {
        InsertManyOptions::default()
    }

    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn bypass_validation(mut self, bypass: bool) -> Self {
        self.bypass_validation = bypass;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

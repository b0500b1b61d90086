//! Query predicates for selecting documents.
//!
//! Filters are opaque to this crate: a [`Filter`] wraps a predicate
//! [`Document`] that is handed to the store connection unmodified. The store
//! defines and evaluates the predicate language; this module only offers a
//! fluent builder surface for the common shapes.
//!
//! # Creating Filters
//!
//! - `field("age").gt(30)` - comparison operators
//! - `field("name").eq("Alice")` - equality checks
//! - `all()` - match all documents
//! - `by_id("507f1f77bcf86cd799439011")` - match by primary key
//! - `field("age").gt(30).and(field("status").eq("active"))` - logical AND
//!
//! # Examples
//!
//! ```rust,ignore
//! use docrepo::filter::{field, all};
//!
//! let age_filter = field("age").gt(30);
//! let combined = age_filter.and(field("status").eq("active"));
//! let results = repository.find_many(combined).await?;
//! ```

use crate::document::{Document, Value, DOC_ID};

/// An opaque query predicate passed through to the store.
///
/// The facade does not validate or interpret the predicate beyond carrying
/// it; whatever the wrapped document expresses is the store's to evaluate
/// or reject.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    predicate: Document,
}

impl Filter {
    /// Wraps a caller-built predicate document.
    pub fn new(predicate: Document) -> Self {
        Filter { predicate }
    }

    /// Returns the underlying predicate document.
    pub fn as_document(&self) -> &Document {
        &self.predicate
    }

    /// Consumes the filter and returns the predicate document.
    pub fn into_document(self) -> Document {
        self.predicate
    }

    /// Combines this filter with another using logical AND.
    pub fn and(self, other: Filter) -> Filter {
        Filter::logical("$and", self, other)
    }

    /// Combines this filter with another using logical OR.
    pub fn or(self, other: Filter) -> Filter {
        Filter::logical("$or", self, other)
    }

    fn logical(operator: &str, left: Filter, right: Filter) -> Filter {
        let mut predicate = Document::new();
        predicate.put(
            operator,
            Value::Array(vec![
                Value::Document(left.predicate),
                Value::Document(right.predicate),
            ]),
        );
        Filter { predicate }
    }
}

impl From<Document> for Filter {
    fn from(predicate: Document) -> Self {
        Filter::new(predicate)
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::default()
}

/// Creates an equality predicate on the store's primary-key field.
///
/// The id string is used verbatim; no coercion is applied beyond what the
/// store itself performs.
pub fn by_id(id: &str) -> Filter {
    field(DOC_ID).eq(id)
}

/// Starts a fluent predicate on the named field.
pub fn field(name: impl Into<String>) -> FilterField {
    FilterField { name: name.into() }
}

/// A field selected for predicate construction; see [`field`].
pub struct FilterField {
    name: String,
}

impl FilterField {
    /// Matches documents whose field equals the value.
    pub fn eq(self, value: impl Into<Value>) -> Filter {
        let mut predicate = Document::new();
        predicate.put(self.name, value);
        Filter { predicate }
    }

    /// Matches documents whose field does not equal the value.
    pub fn ne(self, value: impl Into<Value>) -> Filter {
        self.operator("$ne", value.into())
    }

    /// Matches documents whose field is greater than the value.
    pub fn gt(self, value: impl Into<Value>) -> Filter {
        self.operator("$gt", value.into())
    }

    /// Matches documents whose field is greater than or equal to the value.
    pub fn gte(self, value: impl Into<Value>) -> Filter {
        self.operator("$gte", value.into())
    }

    /// Matches documents whose field is less than the value.
    pub fn lt(self, value: impl Into<Value>) -> Filter {
        self.operator("$lt", value.into())
    }

    /// Matches documents whose field is less than or equal to the value.
    pub fn lte(self, value: impl Into<Value>) -> Filter {
        self.operator("$lte", value.into())
    }

    /// Matches documents whose field equals one of the values.
    pub fn in_(self, values: Vec<Value>) -> Filter {
        self.operator("$in", Value::Array(values))
    }

    fn operator(self, operator: &str, value: Value) -> Filter {
        let mut expression = Document::new();
        expression.put(operator, value);

        let mut predicate = Document::new();
        predicate.put(self.name, Value::Document(expression));
        Filter { predicate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_all_is_empty_predicate() {
        let filter = all();
        assert!(filter.as_document().is_empty());
    }

    #[test]
    fn test_eq_is_direct_equality() {
        let filter = field("name").eq("Alice");
        assert_eq!(filter.as_document(), &doc! { name: "Alice" });
    }

    #[test]
    fn test_by_id_builds_primary_key_equality() {
        let filter = by_id("a");
        assert_eq!(filter.as_document(), &doc! { "_id": "a" });
    }

    #[test]
    fn test_comparison_operators() {
        let filter = field("age").gt(30);
        assert_eq!(filter.as_document(), &doc! { age: { "$gt": 30 } });

        let filter = field("age").lte(65_i64);
        assert_eq!(filter.as_document(), &doc! { age: { "$lte": 65_i64 } });

        let filter = field("status").ne("closed");
        assert_eq!(filter.as_document(), &doc! { status: { "$ne": "closed" } });
    }

    #[test]
    fn test_in_operator() {
        let filter = field("state").in_(vec![Value::from("NY"), Value::from("CA")]);
        assert_eq!(
            filter.as_document(),
            &doc! { state: { "$in": ["NY", "CA"] } }
        );
    }

    #[test]
    fn test_and_wraps_both_predicates() {
        let filter = field("age").gt(30).and(field("status").eq("active"));
        assert_eq!(
            filter.as_document(),
            &doc! { "$and": [{ age: { "$gt": 30 } }, { status: "active" }] }
        );
    }

    #[test]
    fn test_or_wraps_both_predicates() {
        let filter = field("a").eq(1).or(field("b").eq(2));
        assert_eq!(
            filter.as_document(),
            &doc! { "$or": [{ a: 1 }, { b: 2 }] }
        );
    }

    #[test]
    fn test_from_document_passes_through() {
        let predicate = doc! { custom: { "$exists": true } };
        let filter = Filter::from(predicate.clone());
        assert_eq!(filter.into_document(), predicate);
    }
}

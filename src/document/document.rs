use crate::document::Value;
use im::OrdMap;
use std::fmt::{Display, Formatter};

/// A raw document exchanged with the store.
///
/// Documents are composed of key-value pairs. The key is always a [String]
/// and the value is a [Value]. They serve two roles in this crate: the wire
/// representation of a model handed to the store, and the predicate shape a
/// [`crate::filter::Filter`] carries. In both roles the content is passed
/// through to the store uninterpreted, so no key or value validation is
/// performed here; malformed content is the store's to reject.
///
/// ## Lock-Free Design
///
/// The struct uses `im::OrdMap` (a persistent ordered map) for lock-free
/// operation:
/// - O(1) cloning via internal Arc sharing
/// - Mutations create new maps via structural sharing
/// - Each mutated document is completely independent
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// ```
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key.
    ///
    /// If the key already exists, its value is replaced. Accepts any value
    /// type that converts `Into<Value>`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice");
    /// doc.put("age", 30_i64);
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        self.data = self.data.update(key.into(), value.into());
        self
    }

    /// Returns the [Value] associated with the key, or [Value::Null] if the
    /// document contains no mapping for it.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = doc!{ name: "Alice" };
    /// assert_eq!(doc.get("name"), Value::String("Alice".to_string()));
    /// assert_eq!(doc.get("missing"), Value::Null);
    /// ```
    pub fn get(&self, key: &str) -> Value {
        self.data.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Returns a reference to the value for the key, or `None` if absent.
    pub fn try_get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Checks whether the document contains the given top-level key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes the mapping for the key, if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.data.get(key).cloned();
        self.data = self.data.without(key);
        removed
    }

    /// Iterates over the key-value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the field names of the document in key order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, value)) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

// stringify! keeps the quotes of string-literal keys; unquoted identifier
// keys pass through unchanged
#[doc(hidden)]
pub fn normalize(key: &str) -> &str {
    key.trim_matches('"')
}

/// Creates a [`Document`] from key-value pairs.
///
/// Keys can be bare identifiers or string literals; values can be literals,
/// expressions in parentheses, nested `{ .. }` documents, or `[ .. ]` arrays.
///
/// # Examples
///
/// ```ignore
/// let empty = doc!{};
///
/// let person = doc!{
///     name: "Alice",
///     age: 30,
///     address: {
///         city: "New York",
///         zip: 10001,
///     },
///     tags: ["admin", "user"],
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put($crate::document::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the `doc!` macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::document::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::document::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, literal, arithmetic in parens, etc.)
    ($value:expr) => {
        $crate::document::Value::from($value)
    };
}

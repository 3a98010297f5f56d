// ABOUTME: Document store abstraction with pluggable backends (in-memory, SQLite)
// ABOUTME: Defines DocumentStore trait, query model, and StoreError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Document Store
//!
//! A schemaless, per-collection JSON document store. Documents are JSON
//! objects addressed by `(collection, id)`. Queries support equality
//! predicates on top-level fields, a single ordering field and a limit.
//!
//! ```rust,no_run
//! use fitplan_server::store::{memory::InMemoryStore, DocumentStore, Query, SortDirection};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), fitplan_server::store::StoreError> {
//! let store = InMemoryStore::new();
//! store.set("userStats", "uid-1", json!({"totalWorkouts": 3})).await?;
//!
//! let recent = store
//!     .query(
//!         "completions",
//!         Query::new()
//!             .filter("userId", "uid-1")
//!             .order_by("completedAt", SortDirection::Descending)
//!             .limit(30),
//!     )
//!     .await?;
//! # let _ = recent;
//! # Ok(())
//! # }
//! ```

/// Backend selection from a store URL
pub mod factory;
mod fallback;
/// In-memory backend
pub mod memory;
/// SQLite backend
pub mod sqlite;

use std::cmp::Ordering;

use async_trait::async_trait;
use fitplan_core::errors::{AppError, ErrorCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use fallback::OrFallback;

/// Errors raised by document store backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller is not allowed to access the document or collection
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Document does not exist
    #[error("Document {collection}/{id} not found")]
    NotFound {
        /// Collection name
        collection: String,
        /// Document id
        id: String,
    },

    /// Backend is unreachable or failed
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Document body could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Query references a field name the backend cannot address
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl StoreError {
    /// Build a `NotFound` error
    #[must_use]
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_owned(),
            id: id.to_owned(),
        }
    }

    /// Whether the error only says the document is missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        let code = match &error {
            StoreError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            StoreError::NotFound { .. } => ErrorCode::ResourceNotFound,
            StoreError::Unavailable(_) => ErrorCode::ResourceUnavailable,
            StoreError::Serialization(_) => ErrorCode::SerializationError,
            StoreError::InvalidQuery(_) => ErrorCode::StorageError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A document returned from a query
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id within its collection
    pub id: String,
    /// Document body, always a JSON object
    pub data: Value,
}

impl Document {
    /// Decode the body into `T`, with the document id as its `id` field
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the body does not match `T`
    pub fn decode<T: DeserializeOwned>(self) -> StoreResult<T> {
        let mut data = self.data;
        if let Value::Object(map) = &mut data {
            map.insert("id".to_owned(), Value::String(self.id));
        }
        Ok(serde_json::from_value(data)?)
    }
}

/// Equality predicate on a top-level field
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name
    pub field: String,
    /// Value the field must equal
    pub value: Value,
}

/// Sort direction for [`Query::order_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field name
    pub field: String,
    /// Direction
    pub direction: SortDirection,
}

/// Collection query: all filters must match, then ordering, then limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Equality predicates, combined with AND
    pub filters: Vec<Filter>,
    /// Optional ordering
    pub order_by: Option<OrderBy>,
    /// Optional maximum number of documents
    pub limit: Option<usize>,
}

impl Query {
    /// Query matching every document in the collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality predicate
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Order results by a field
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Cap the number of results
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `data` satisfies every filter
    #[must_use]
    pub fn matches(&self, data: &Value) -> bool {
        self.filters
            .iter()
            .all(|filter| data.get(&filter.field).unwrap_or(&Value::Null) == &filter.value)
    }

    /// Reject field names that are not plain identifiers
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidQuery` for the first offending field
    pub fn validate(&self) -> StoreResult<()> {
        let fields = self
            .filters
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.order_by.iter().map(|o| o.field.as_str()));
        for field in fields {
            if !is_plain_field(field) {
                return Err(StoreError::InvalidQuery(format!(
                    "unsupported field name '{field}'"
                )));
            }
        }
        Ok(())
    }
}

/// Field names are ASCII identifiers so they can be embedded in JSON paths
fn is_plain_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Total order over JSON values used for sorting query results
///
/// Nulls sort first, then booleans, numbers, strings; other kinds compare equal.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    const fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Schemaless document store
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document body
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Value>;

    /// Create or replace a document
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()>;

    /// Merge the top-level fields of `patch` into an existing document
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist
    async fn update(&self, collection: &str, id: &str, patch: Value) -> StoreResult<()>;

    /// Delete a document; deleting a missing document succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Insert a document under a generated id and return the id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write
    async fn add(&self, collection: &str, data: Value) -> StoreResult<String>;

    /// Run a query against a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid or the backend fails
    async fn query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>>;

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Cheap liveness probe
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the backend cannot serve requests
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Merge top-level fields of `patch` into `target`
///
/// # Errors
///
/// Returns `StoreError::Serialization` if either side is not a JSON object
pub(crate) fn merge_top_level(target: &mut Value, patch: Value) -> StoreResult<()> {
    let Value::Object(patch) = patch else {
        return Err(StoreError::Serialization(
            "update patch must be a JSON object".to_owned(),
        ));
    };
    let Value::Object(target) = target else {
        return Err(StoreError::Serialization(
            "stored document is not a JSON object".to_owned(),
        ));
    };
    for (key, value) in patch {
        target.insert(key, value);
    }
    Ok(())
}

/// Reject non-object document bodies
pub(crate) fn ensure_object(data: &Value) -> StoreResult<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(StoreError::Serialization(
            "document body must be a JSON object".to_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_matches_all_filters() {
        let query = Query::new().filter("status", "approved").filter("difficulty", "beginner");
        assert!(query.matches(&json!({"status": "approved", "difficulty": "beginner"})));
        assert!(!query.matches(&json!({"status": "pending", "difficulty": "beginner"})));
        assert!(!query.matches(&json!({"status": "approved"})));
    }

    #[test]
    fn test_query_rejects_path_like_fields() {
        let query = Query::new().filter("a.b", 1);
        assert!(matches!(query.validate(), Err(StoreError::InvalidQuery(_))));
        assert!(Query::new().filter("ownerId", "u").validate().is_ok());
    }

    #[test]
    fn test_merge_top_level_replaces_fields() {
        let mut doc = json!({"a": 1, "b": {"c": 2}});
        merge_top_level(&mut doc, json!({"b": {"d": 3}, "e": 4})).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": {"d": 3}, "e": 4}));
    }

    #[test]
    fn test_store_error_maps_to_app_error() {
        let error: AppError = StoreError::Unavailable("down".to_owned()).into();
        assert_eq!(error.code, ErrorCode::ResourceUnavailable);

        let error: AppError = StoreError::not_found("users", "u1").into();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
    }

    #[test]
    fn test_document_decode_injects_id() {
        #[derive(serde::Deserialize)]
        struct Named {
            id: String,
            name: String,
        }
        let doc = Document {
            id: "d1".to_owned(),
            data: json!({"name": "x"}),
        };
        let named: Named = doc.decode().unwrap();
        assert_eq!(named.id, "d1");
        assert_eq!(named.name, "x");
    }
}

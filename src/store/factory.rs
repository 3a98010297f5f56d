// ABOUTME: Store factory selecting the document store backend from a URL
// ABOUTME: memory:// for the in-memory store, sqlite:<path> for SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use tracing::info;

use super::memory::InMemoryStore;
use super::sqlite::SqliteStore;
use super::{DocumentStore, StoreError, StoreResult};

/// Parsed store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// Volatile in-process store
    Memory,
    /// SQLite database; the string is the sqlx connection URL
    Sqlite(String),
}

impl StoreUrl {
    /// Parse a store URL
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` for unsupported schemes
    pub fn parse(url: &str) -> StoreResult<Self> {
        let url = url.trim();
        if url == "memory" || url.starts_with("memory://") {
            return Ok(Self::Memory);
        }
        if url.starts_with("sqlite:") {
            return Ok(Self::Sqlite(url.to_owned()));
        }
        Err(StoreError::Unavailable(format!(
            "unsupported store URL '{url}', expected memory:// or sqlite:<path>"
        )))
    }
}

/// Open the store named by `url`
///
/// # Errors
///
/// Returns an error if the URL is unsupported or the database cannot be opened
pub async fn create_store(url: &str) -> StoreResult<Arc<dyn DocumentStore>> {
    match StoreUrl::parse(url)? {
        StoreUrl::Memory => {
            info!("Using in-memory document store (data is not persisted)");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreUrl::Sqlite(connection_url) => {
            let store = SqliteStore::connect(&connection_url).await?;
            info!(url = %connection_url, "Using SQLite document store");
            Ok(Arc::new(store))
        }
    }
}

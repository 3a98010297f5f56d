// ABOUTME: SQLite document store keeping JSON bodies in a single documents table
// ABOUTME: Equality filters and ordering are evaluated with json_extract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::fs;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Error as SqlxError, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{
    ensure_object, merge_top_level, Document, DocumentStore, Query, SortDirection, StoreError,
    StoreResult,
};

/// Document store on top of a SQLite database file
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and run the schema migration
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be opened
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let in_memory = url.contains(":memory:");
        if !in_memory {
            ensure_parent_dir(url)?;
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so the
        // single connection must never be recycled
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Wrap an existing pool; the schema is created if missing
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the schema cannot be created
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("SQLite document schema ready");
        Ok(())
    }

    async fn write(&self, collection: &str, id: &str, data: &Value) -> StoreResult<()> {
        ensure_object(data)?;
        let body = serde_json::to_string(data)?;

        sqlx::query(
            r"
            INSERT INTO documents (collection, id, body, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at
            ",
        )
        .bind(collection)
        .bind(id)
        .bind(body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Value> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        decode_body(&row)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.write(collection, id, &data).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        let mut body = decode_body(&row)?;
        merge_top_level(&mut body, patch)?;

        sqlx::query(
            "UPDATE documents SET body = $1, updated_at = $2 WHERE collection = $3 AND id = $4",
        )
        .bind(serde_json::to_string(&body)?)
        .bind(Utc::now().to_rfc3339())
        .bind(collection)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn add(&self, collection: &str, data: Value) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.write(collection, &id, &data).await?;
        Ok(id)
    }

    async fn query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>> {
        query.validate()?;

        let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?");
        for filter in &query.filters {
            match filter.value {
                Value::Null => sql.push_str(" AND json_extract(body, ?) IS NULL"),
                Value::Array(_) | Value::Object(_) => {
                    sql.push_str(" AND json_extract(body, ?) = json(?)");
                }
                _ => sql.push_str(" AND json_extract(body, ?) = ?"),
            }
        }
        if let Some(order) = &query.order_by {
            let direction = match order.direction {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            };
            sql.push_str(&format!(" ORDER BY json_extract(body, ?) {direction}, id ASC"));
        } else {
            sql.push_str(" ORDER BY id ASC");
        }
        if query.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut statement = sqlx::query(&sql).bind(collection.to_owned());
        for filter in &query.filters {
            statement = statement.bind(json_path(&filter.field));
            statement = match &filter.value {
                Value::Null => statement,
                Value::Bool(flag) => statement.bind(i64::from(*flag)),
                Value::Number(number) => match number.as_i64() {
                    Some(integer) => statement.bind(integer),
                    None => statement.bind(number.as_f64().unwrap_or_default()),
                },
                Value::String(text) => statement.bind(text.clone()),
                nested @ (Value::Array(_) | Value::Object(_)) => statement.bind(nested.to_string()),
            };
        }
        if let Some(order) = &query.order_by {
            statement = statement.bind(json_path(&order.field));
        }
        if let Some(limit) = query.limit {
            statement = statement.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(Document {
                    id: row.try_get("id").map_err(map_sqlx_error)?,
                    data: decode_body(row)?,
                })
            })
            .collect()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

fn decode_body(row: &SqliteRow) -> StoreResult<Value> {
    let body: String = row.try_get("body").map_err(map_sqlx_error)?;
    Ok(serde_json::from_str(&body)?)
}

fn map_sqlx_error(error: SqlxError) -> StoreError {
    match error {
        SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) => {
            StoreError::Serialization(error.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

/// Create the directory holding the database file
fn ensure_parent_dir(url: &str) -> StoreResult<()> {
    let path = url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//")
        .split('?')
        .next()
        .unwrap_or_default();

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!(
                    "cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

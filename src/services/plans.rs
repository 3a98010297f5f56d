// ABOUTME: The user's private saved workout and meal plans
// ABOUTME: Owner-scoped create, list, read, patch, and delete over the document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{to_value, Value};
use tracing::{debug, instrument};

use crate::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::{PlanKind, PlanSource, SavedPlan};
use crate::store::{DocumentStore, Query, SortDirection};

/// Body of a plan creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    /// Plan title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Plan content: generated text or a structured plan
    #[serde(default)]
    pub content: Value,
}

/// Partial update of a saved plan; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New content
    pub content: Option<Value>,
}

/// Saved plans, one collection per plan kind
#[derive(Clone)]
pub struct PlanLibrary {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl PlanLibrary {
    /// Create a library over `store`
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The user's plans of `kind`, newest first
    ///
    /// # Errors
    ///
    /// Propagates store failures
    pub async fn list(&self, user_id: &str, kind: PlanKind) -> AppResult<Vec<SavedPlan>> {
        let query = Query::new()
            .filter("userId", user_id)
            .order_by("createdAt", SortDirection::Descending);
        let documents = self.store.query(kind.library_collection(), query).await?;
        Ok(documents
            .into_iter()
            .map(|doc| doc.decode())
            .collect::<Result<_, _>>()?)
    }

    /// One of the user's plans
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the plan does not exist or belongs to another user
    pub async fn get(&self, user_id: &str, kind: PlanKind, id: &str) -> AppResult<SavedPlan> {
        let body = match self.store.get(kind.library_collection(), id).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Err(not_found(kind, id)),
            Err(e) => return Err(e.into()),
        };
        let mut plan: SavedPlan = serde_json::from_value(body)?;
        if plan.user_id != user_id {
            debug!(plan.id = %id, "Plan belongs to another user");
            return Err(not_found(kind, id));
        }
        id.clone_into(&mut plan.id);
        Ok(plan)
    }

    /// Store a new plan for the user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title and propagates store failures
    #[instrument(skip(self, plan), fields(user.id = %user_id, plan.kind = %kind))]
    pub async fn create(
        &self,
        user_id: &str,
        kind: PlanKind,
        plan: NewPlan,
        source: PlanSource,
    ) -> AppResult<SavedPlan> {
        if plan.title.trim().is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }
        let now = self.clock.now();
        let mut saved = SavedPlan {
            id: String::new(),
            user_id: user_id.to_owned(),
            kind,
            title: plan.title.trim().to_owned(),
            description: plan.description,
            content: plan.content,
            source,
            created_at: now,
            updated_at: now,
        };
        saved.id = self
            .store
            .add(kind.library_collection(), to_value(&saved)?)
            .await?;
        Ok(saved)
    }

    /// Apply `patch` to one of the user's plans
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for plans the user does not own and
    /// `InvalidInput` if the patch blanks the title
    pub async fn update(
        &self,
        user_id: &str,
        kind: PlanKind,
        id: &str,
        patch: PlanPatch,
    ) -> AppResult<SavedPlan> {
        let mut plan = self.get(user_id, kind, id).await?;
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(AppError::invalid_input("title cannot be empty"));
            }
            plan.title = title.trim().to_owned();
        }
        if let Some(description) = patch.description {
            plan.description = description;
        }
        if let Some(content) = patch.content {
            plan.content = content;
        }
        plan.updated_at = self.clock.now();

        self.store
            .set(kind.library_collection(), id, to_value(&plan)?)
            .await?;
        Ok(plan)
    }

    /// Delete one of the user's plans
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for plans the user does not own
    pub async fn delete(&self, user_id: &str, kind: PlanKind, id: &str) -> AppResult<()> {
        self.get(user_id, kind, id).await?;
        self.store.delete(kind.library_collection(), id).await?;
        Ok(())
    }

    /// Delete every saved plan of the user and return how many were removed
    ///
    /// # Errors
    ///
    /// Propagates the first store failure
    pub async fn delete_all(&self, user_id: &str) -> AppResult<usize> {
        let mut removed = 0;
        for kind in [PlanKind::Workout, PlanKind::Meal] {
            let collection = kind.library_collection();
            let owned = self
                .store
                .query(collection, Query::new().filter("userId", user_id))
                .await?;
            for doc in owned {
                self.store.delete(collection, &doc.id).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn not_found(kind: PlanKind, id: &str) -> AppError {
    AppError::not_found(format!("{} {id}", kind.label())).with_resource_id(id)
}

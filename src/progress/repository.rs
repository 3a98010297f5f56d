// ABOUTME: Typed access to progress collections on top of the document store
// ABOUTME: Stats, completion events, and awarded achievements for one user at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::to_value;

use crate::constants::collections::{ACHIEVEMENTS, COMPLETIONS, USER_STATS};
use crate::models::{AwardedAchievement, CompletionEvent, UserProgressStats};
use crate::store::{DocumentStore, Query, SortDirection, StoreError, StoreResult};

/// Progress persistence for the engine
#[derive(Clone)]
pub(crate) struct ProgressRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProgressRepository {
    /// Wrap a store handle
    #[must_use]
    pub(crate) fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Append an immutable completion event
    pub(crate) async fn append_event(&self, event: &CompletionEvent) -> StoreResult<String> {
        self.store.add(COMPLETIONS, to_value(event)?).await
    }

    /// Load the aggregate stats record; `None` when the user has none yet
    pub(crate) async fn load_stats(&self, user_id: &str) -> StoreResult<Option<UserProgressStats>> {
        match self.store.get(USER_STATS, user_id).await {
            Ok(body) => Ok(Some(serde_json::from_value(body)?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Replace the aggregate stats record
    pub(crate) async fn save_stats(&self, user_id: &str, stats: &UserProgressStats) -> StoreResult<()> {
        self.store.set(USER_STATS, user_id, to_value(stats)?).await
    }

    /// Most recent completion events, newest first
    pub(crate) async fn recent_events(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<CompletionEvent>> {
        let query = Query::new()
            .filter("userId", user_id)
            .order_by("completedAt", SortDirection::Descending)
            .limit(limit);
        self.store
            .query(COMPLETIONS, query)
            .await?
            .into_iter()
            .map(|doc| doc.decode())
            .collect()
    }

    /// Every award the user holds
    pub(crate) async fn awards(&self, user_id: &str) -> StoreResult<Vec<AwardedAchievement>> {
        self.store
            .query(ACHIEVEMENTS, Query::new().filter("userId", user_id))
            .await?
            .into_iter()
            .map(|doc| doc.decode())
            .collect()
    }

    /// Ids of the achievements the user holds
    pub(crate) async fn awarded_ids(&self, user_id: &str) -> StoreResult<HashSet<String>> {
        Ok(self
            .awards(user_id)
            .await?
            .into_iter()
            .map(|award| award.achievement_id)
            .collect())
    }

    /// Persist an award under its deterministic id; writing it twice is harmless
    pub(crate) async fn save_award(&self, award: &AwardedAchievement) -> StoreResult<()> {
        let id = AwardedAchievement::document_id(&award.user_id, &award.achievement_id);
        self.store.set(ACHIEVEMENTS, &id, to_value(award)?).await
    }

    /// Remove stats, events and awards belonging to the user
    pub(crate) async fn delete_all(&self, user_id: &str) -> StoreResult<()> {
        for collection in [COMPLETIONS, ACHIEVEMENTS] {
            let owned = self
                .store
                .query(collection, Query::new().filter("userId", user_id))
                .await?;
            for doc in owned {
                self.store.delete(collection, &doc.id).await?;
            }
        }
        self.store.delete(USER_STATS, user_id).await
    }
}

// ABOUTME: Plan catalog of curated and user-submitted workout and meal plans
// ABOUTME: Filtered listing with mock fallback, submission, lookup, and admin approval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Plan Catalog
//!
//! Listing never fails: an empty result or a store error is answered with
//! the bundled curated plans from [`mock`], filtered by the same predicates.
//! Submission, lookup and approval propagate their errors.

/// Curated plans bundled with the server
pub mod mock;
/// Submission decoding and text-field parsing
pub mod submission;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, to_value, Value};
use tracing::{info, instrument, warn};

use crate::clock::Clock;
use crate::constants::catalog::{FILTER_ALL, STATUS_FIELD};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CatalogEntry, MealCatalogEntry, PlanKind, PlanStatus, WorkoutCatalogEntry,
};
use crate::store::{DocumentStore, OrFallback, Query, SortDirection, StoreError};
use submission::{MealSubmission, WorkoutSubmission};

/// Filters for workout listings; `"all"` or empty means no filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFilters {
    /// beginner, intermediate, advanced
    pub difficulty: Option<String>,
    /// e.g. "30 min"
    pub duration: Option<String>,
}

/// Filters for meal listings; `"all"` or empty means no filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFilters {
    /// balanced, vegetarian, ...
    pub dietary_category: Option<String>,
}

impl WorkoutFilters {
    fn predicates(&self) -> Vec<(&'static str, &str)> {
        [("difficulty", &self.difficulty), ("duration", &self.duration)]
            .into_iter()
            .filter_map(|(field, value)| active(value.as_deref()).map(|v| (field, v)))
            .collect()
    }

    fn matches(&self, entry: &WorkoutCatalogEntry) -> bool {
        active(self.difficulty.as_deref()).is_none_or(|d| entry.body.difficulty == d)
            && active(self.duration.as_deref()).is_none_or(|d| entry.body.duration == d)
    }
}

impl MealFilters {
    fn predicates(&self) -> Vec<(&'static str, &str)> {
        active(self.dietary_category.as_deref())
            .map(|category| vec![("dietaryCategory", category)])
            .unwrap_or_default()
    }

    fn matches(&self, entry: &MealCatalogEntry) -> bool {
        active(self.dietary_category.as_deref())
            .is_none_or(|category| entry.body.dietary_category == category)
    }
}

/// Filter value that should constrain the listing
fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(FILTER_ALL))
}

/// A catalog entry of either kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogPlan {
    /// Workout plan
    Workout(WorkoutCatalogEntry),
    /// Meal plan
    Meal(MealCatalogEntry),
}

impl CatalogPlan {
    /// Document id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Workout(entry) => &entry.id,
            Self::Meal(entry) => &entry.id,
        }
    }

    /// Curation state
    #[must_use]
    pub const fn status(&self) -> PlanStatus {
        match self {
            Self::Workout(entry) => entry.status,
            Self::Meal(entry) => entry.status,
        }
    }

    fn to_value(&self) -> AppResult<Value> {
        Ok(match self {
            Self::Workout(entry) => to_value(entry)?,
            Self::Meal(entry) => to_value(entry)?,
        })
    }
}

/// Catalog access over the document store
#[derive(Clone)]
pub struct PlanCatalog {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl PlanCatalog {
    /// Create a catalog over `store`
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Approved workout plans matching `filters`
    #[instrument(skip(self))]
    pub async fn list_workout_plans(&self, filters: &WorkoutFilters) -> Vec<WorkoutCatalogEntry> {
        let stored = self
            .approved_entries(PlanKind::Workout, &filters.predicates())
            .await
            .or_fallback("list_workout_plans", PlanKind::Workout.catalog_collection(), Vec::new);
        if !stored.is_empty() {
            return stored;
        }
        mock::curated_workouts()
            .into_iter()
            .filter(|entry| filters.matches(entry))
            .collect()
    }

    /// Approved meal plans matching `filters`
    #[instrument(skip(self))]
    pub async fn list_meal_plans(&self, filters: &MealFilters) -> Vec<MealCatalogEntry> {
        let stored = self
            .approved_entries(PlanKind::Meal, &filters.predicates())
            .await
            .or_fallback("list_meal_plans", PlanKind::Meal.catalog_collection(), Vec::new);
        if !stored.is_empty() {
            return stored;
        }
        mock::curated_meals()
            .into_iter()
            .filter(|entry| filters.matches(entry))
            .collect()
    }

    async fn approved_entries<B: DeserializeOwned>(
        &self,
        kind: PlanKind,
        predicates: &[(&str, &str)],
    ) -> Result<Vec<CatalogEntry<B>>, StoreError> {
        let query = predicates
            .iter()
            .fold(
                Query::new().filter(STATUS_FIELD, PlanStatus::Approved.as_str()),
                |query, (field, value)| query.filter(*field, *value),
            )
            .order_by("avgRating", SortDirection::Descending);

        let documents = self.store.query(kind.catalog_collection(), query).await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                doc.decode()
                    .inspect_err(|e| warn!(plan.id = %id, error = %e, "Skipping malformed catalog entry"))
                    .ok()
            })
            .collect())
    }

    /// Submit a user plan for curation
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `raw` lacks the submission shape
    /// - `InvalidFormat` if the exercise or meal list cannot be parsed
    /// - store errors if the entry cannot be written
    #[instrument(skip(self, raw), fields(user.id = %user_id, plan.kind = %kind))]
    pub async fn submit_plan(
        &self,
        user_id: &str,
        kind: PlanKind,
        raw: Value,
    ) -> AppResult<CatalogPlan> {
        if user_id.trim().is_empty() {
            return Err(AppError::invalid_input("User ID is required"));
        }
        let now = self.clock.now();
        let mut plan = match kind {
            PlanKind::Workout => {
                let (title, description, body) = WorkoutSubmission::from_value(raw)?.into_body()?;
                CatalogPlan::Workout(pending_entry(user_id, title, description, now, body))
            }
            PlanKind::Meal => {
                let (title, description, body) = MealSubmission::from_value(raw)?.into_body()?;
                CatalogPlan::Meal(pending_entry(user_id, title, description, now, body))
            }
        };

        let id = self
            .store
            .add(kind.catalog_collection(), plan.to_value()?)
            .await?;
        match &mut plan {
            CatalogPlan::Workout(entry) => entry.id.clone_from(&id),
            CatalogPlan::Meal(entry) => entry.id.clone_from(&id),
        }
        info!(plan.id = %id, "Plan submitted for review");
        Ok(plan)
    }

    /// Fetch one catalog entry
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no entry has this id.
    pub async fn get_plan(&self, kind: PlanKind, id: &str) -> AppResult<CatalogPlan> {
        let mut body = self
            .store
            .get(kind.catalog_collection(), id)
            .await
            .map_err(|e| not_found_or(e, kind, id))?;
        if let Value::Object(map) = &mut body {
            map.insert("id".to_owned(), json!(id));
        }
        Ok(match kind {
            PlanKind::Workout => CatalogPlan::Workout(serde_json::from_value(body)?),
            PlanKind::Meal => CatalogPlan::Meal(serde_json::from_value(body)?),
        })
    }

    /// Mark a submitted entry as approved; approving twice is harmless
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no entry has this id.
    #[instrument(skip(self))]
    pub async fn approve_plan(&self, kind: PlanKind, id: &str) -> AppResult<CatalogPlan> {
        let plan = self.get_plan(kind, id).await?;
        if plan.status() == PlanStatus::Approved {
            return Ok(plan);
        }
        self.store
            .update(
                kind.catalog_collection(),
                id,
                json!({ "status": PlanStatus::Approved.as_str() }),
            )
            .await
            .map_err(|e| not_found_or(e, kind, id))?;
        info!(plan.id = %id, "Plan approved");

        Ok(match plan {
            CatalogPlan::Workout(entry) => CatalogPlan::Workout(CatalogEntry {
                status: PlanStatus::Approved,
                ..entry
            }),
            CatalogPlan::Meal(entry) => CatalogPlan::Meal(CatalogEntry {
                status: PlanStatus::Approved,
                ..entry
            }),
        })
    }
}

fn pending_entry<B>(
    user_id: &str,
    title: String,
    description: String,
    now: DateTime<Utc>,
    body: B,
) -> CatalogEntry<B> {
    CatalogEntry {
        id: String::new(),
        owner_id: Some(user_id.to_owned()),
        status: PlanStatus::Pending,
        avg_rating: 0.0,
        total_ratings: 0,
        title,
        description,
        created_at: now,
        body,
    }
}

fn not_found_or(error: StoreError, kind: PlanKind, id: &str) -> AppError {
    if error.is_not_found() {
        AppError::not_found(format!("{} {id}", kind.label())).with_resource_id(id)
    } else {
        error.into()
    }
}

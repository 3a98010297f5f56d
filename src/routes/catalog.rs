// ABOUTME: Route handlers for the shared plan catalog
// ABOUTME: Filtered listings, user submissions, lookup, and admin approval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use super::ApiResponse;
use crate::catalog::{MealFilters, WorkoutFilters};
use crate::errors::AppError;
use crate::models::PlanKind;
use crate::resources::ServerResources;

/// Catalog routes implementation
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/catalog/workouts", get(Self::handle_list_workouts))
            .route("/api/catalog/meals", get(Self::handle_list_meals))
            .route("/api/catalog/submissions", post(Self::handle_submit))
            .route("/api/catalog/:kind/:id", get(Self::handle_get))
            .route("/api/catalog/:kind/:id/approve", post(Self::handle_approve))
            .with_state(resources)
    }

    /// Handle GET /api/catalog/workouts?difficulty=&duration=
    async fn handle_list_workouts(
        State(resources): State<Arc<ServerResources>>,
        Query(filters): Query<WorkoutFilters>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate(&headers).await?;
        let plans = resources.catalog.list_workout_plans(&filters).await;
        Ok(ApiResponse::ok(plans).into_response())
    }

    /// Handle GET /api/catalog/meals?dietaryCategory=
    async fn handle_list_meals(
        State(resources): State<Arc<ServerResources>>,
        Query(filters): Query<MealFilters>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate(&headers).await?;
        let plans = resources.catalog.list_meal_plans(&filters).await;
        Ok(ApiResponse::ok(plans).into_response())
    }

    /// Handle POST /api/catalog/submissions - Body carries `kind` next to the plan fields
    async fn handle_submit(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let kind: PlanKind = body
            .get("kind")
            .or_else(|| body.get("type"))
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::invalid_input("kind is required ('workout' or 'meal')"))?
            .parse()?;

        let plan = resources.catalog.submit_plan(&user.uid, kind, body).await?;
        Ok(ApiResponse::ok(plan)
            .with_message("Plan submitted for review")
            .created())
    }

    /// Handle GET /api/catalog/:kind/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path((kind, id)): Path<(String, String)>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate(&headers).await?;
        let plan = resources.catalog.get_plan(kind.parse()?, &id).await?;
        Ok(ApiResponse::ok(plan).into_response())
    }

    /// Handle POST /api/catalog/:kind/:id/approve - Admin only
    async fn handle_approve(
        State(resources): State<Arc<ServerResources>>,
        Path((kind, id)): Path<(String, String)>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate_admin(&headers).await?;
        let plan = resources.catalog.approve_plan(kind.parse()?, &id).await?;
        Ok(ApiResponse::ok(plan).into_response())
    }
}

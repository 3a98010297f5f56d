// ABOUTME: Route handlers for the user's saved workout and meal plans
// ABOUTME: CRUD under /api/workouts and /api/meals plus LLM generation of new plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Saved plan routes
//!
//! The same handlers serve both plan kinds; each nested router carries its
//! [`PlanKind`] as a request extension.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::{PlanKind, PlanSource};
use crate::resources::ServerResources;
use crate::services::{NewPlan, PlanPatch};

/// Saved plan routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all saved plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .nest("/api/workouts", Self::kind_routes(PlanKind::Workout))
            .nest("/api/meals", Self::kind_routes(PlanKind::Meal))
            .with_state(resources)
    }

    fn kind_routes(kind: PlanKind) -> Router<Arc<ServerResources>> {
        Router::new()
            .route("/", get(Self::handle_list).post(Self::handle_create))
            .route("/generate", post(Self::handle_generate))
            .route(
                "/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .layer(Extension(kind))
    }

    /// Handle GET /api/{kind}s - List the user's plans, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let plans = resources.plans.list(&user.uid, kind).await?;
        Ok(ApiResponse::ok(plans).into_response())
    }

    /// Handle POST /api/{kind}s - Save a new plan
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        headers: HeaderMap,
        Json(body): Json<NewPlan>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let plan = resources
            .plans
            .create(&user.uid, kind, body, PlanSource::Manual)
            .await?;
        Ok(ApiResponse::ok(plan).created())
    }

    /// Handle GET /api/{kind}s/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let plan = resources.plans.get(&user.uid, kind, &id).await?;
        Ok(ApiResponse::ok(plan).into_response())
    }

    /// Handle PUT /api/{kind}s/:id - Patch title, description or content
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        Path(id): Path<String>,
        headers: HeaderMap,
        Json(patch): Json<PlanPatch>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let plan = resources.plans.update(&user.uid, kind, &id, patch).await?;
        Ok(ApiResponse::ok(plan).into_response())
    }

    /// Handle DELETE /api/{kind}s/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        Path(id): Path<String>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        resources.plans.delete(&user.uid, kind, &id).await?;
        Ok(ApiResponse::message(format!("{} deleted", kind.label())).into_response())
    }

    /// Handle POST /api/{kind}s/generate - Draft a plan from the profile and save it
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        Extension(kind): Extension<PlanKind>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let generator = resources.generator()?;
        let profile = resources.profiles.get_or_create(&user).await?;

        let (text, title) = match kind {
            PlanKind::Workout => (
                generator.generate_workout_plan(&profile).await?,
                "Personalized 7-Day Workout Plan",
            ),
            PlanKind::Meal => (
                generator
                    .generate_meal_plan(&profile, &profile.settings)
                    .await?,
                "Personalized 7-Day Meal Plan",
            ),
        };

        let plan = NewPlan {
            title: title.to_owned(),
            description: "Generated from your profile".to_owned(),
            content: Value::String(text),
        };
        let saved = resources
            .plans
            .create(&user.uid, kind, plan, PlanSource::Generated)
            .await?;
        Ok(ApiResponse::ok(saved).created())
    }
}

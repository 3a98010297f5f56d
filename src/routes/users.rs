// ABOUTME: Route handlers for the signed-in user's profile, settings, and progress
// ABOUTME: Also serves achievements, LLM fitness advice, and account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::{ProfileUpdate, UserSettings};
use crate::resources::ServerResources;

/// Message attached to a completion that was only partially persisted
pub const OFFLINE_MODE_MESSAGE: &str = "Progress logged in offline mode";

/// Body of POST /api/users/progress
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCompletionRequest {
    /// `workout` or `meal`
    #[serde(alias = "type")]
    pub kind: String,
    /// Plan the completion refers to
    #[serde(default, alias = "planId")]
    pub reference_id: String,
}

/// Body of POST /api/users/advice
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    /// The user's question
    #[serde(alias = "query")]
    pub question: String,
}

/// Answer returned by POST /api/users/advice
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    /// Generated advice
    pub answer: String,
}

/// Body of DELETE /api/users/account
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    /// The account email, retyped by the user
    pub confirmation_email: String,
}

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .route(
                "/api/users/preferences",
                get(Self::handle_get_preferences).put(Self::handle_update_preferences),
            )
            .route(
                "/api/users/progress",
                get(Self::handle_get_progress).post(Self::handle_record_completion),
            )
            .route("/api/users/achievements", get(Self::handle_achievements))
            .route("/api/users/advice", post(Self::handle_advice))
            .route("/api/users/account", delete(Self::handle_delete_account))
            .with_state(resources)
    }

    /// Handle GET /api/users/profile - Profile, created on first access
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let profile = resources.profiles.get_or_create(&user).await?;
        Ok(ApiResponse::ok(profile).into_response())
    }

    /// Handle PUT /api/users/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let profile = resources.profiles.update_profile(&user, update).await?;
        Ok(ApiResponse::ok(profile).into_response())
    }

    /// Handle GET /api/users/preferences
    async fn handle_get_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let settings = resources.profiles.get_settings(&user).await?;
        Ok(ApiResponse::ok(settings).into_response())
    }

    /// Handle PUT /api/users/preferences - Replace settings; missing fields take defaults
    async fn handle_update_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(settings): Json<UserSettings>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let settings = resources.profiles.update_settings(&user, settings).await?;
        Ok(ApiResponse::ok(settings).into_response())
    }

    /// Handle GET /api/users/progress - 503 when no progress source is readable
    async fn handle_get_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let stats = resources.progress.get_progress(&user.uid).await?;
        Ok(ApiResponse::ok(stats).into_response())
    }

    /// Handle POST /api/users/progress - Record a workout or meal completion
    async fn handle_record_completion(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecordCompletionRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let outcome = resources
            .progress
            .record_completion(&user.uid, &body.reference_id, &body.kind)
            .await?;

        let degraded = outcome.degraded;
        let response = ApiResponse::ok(outcome);
        let response = if degraded {
            response.with_message(OFFLINE_MODE_MESSAGE)
        } else {
            response
        };
        Ok(response.into_response())
    }

    /// Handle GET /api/users/achievements - Never fails once authenticated
    async fn handle_achievements(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let achievements = resources.progress.get_achievements(&user.uid).await;
        Ok(ApiResponse::ok(achievements).into_response())
    }

    /// Handle POST /api/users/advice - Answer a fitness question
    async fn handle_advice(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<AdviceRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        let generator = resources.generator()?;
        let profile = resources.profiles.get_or_create(&user).await?;
        let answer = generator.fitness_advice(&profile, &body.question).await?;
        Ok(ApiResponse::ok(AdviceResponse { answer }).into_response())
    }

    /// Handle DELETE /api/users/account - Requires the retyped account email
    async fn handle_delete_account(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<DeleteAccountRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth.authenticate(&headers).await?;
        resources
            .profiles
            .delete_account(&user, &body.confirmation_email)
            .await?;
        Ok(ApiResponse::message("Your account has been deleted.").into_response())
    }
}

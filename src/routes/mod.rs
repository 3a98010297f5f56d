// ABOUTME: Route module organization for the FitPlan HTTP API
// ABOUTME: Shared success envelope plus one router per domain area
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Route module for the FitPlan API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that authenticate, decode the request, and delegate to the
//! service layer. Successful responses use [`ApiResponse`]; failures are
//! rendered by `AppError`'s `IntoResponse` as `{ success: false, message, code }`.

/// Curated and submitted plan catalog routes
pub mod catalog;
/// Health check and readiness routes
pub mod health;
/// Saved workout and meal plan routes
pub mod plans;
/// Profile, settings, progress, achievements, advice, and account routes
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub use catalog::CatalogRoutes;
pub use health::HealthRoutes;
pub use plans::PlanRoutes;
pub use users::UserRoutes;

/// Success envelope: `{ "success": true, "data": ..., "message": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this type
    pub success: bool,
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Informational message for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope carrying `data`
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Attach an informational message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Render with `201 Created`
    #[must_use]
    pub fn created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

impl ApiResponse<()> {
    /// Envelope with only a message
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ABOUTME: Bearer token authentication for API routes
// ABOUTME: Extracts the Authorization header, verifies it, and enforces the admin claim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::field::Empty;
use tracing::{debug, warn, Span};

use crate::auth::{AuthenticatedUser, TokenVerifier};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Authentication gate shared by all protected routes
#[derive(Clone)]
pub struct AuthMiddleware {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthMiddleware {
    /// Create middleware around a token verifier
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// - `AuthRequired` when no bearer token is present
    /// - `AuthInvalid` / `AuthExpired` when the token is rejected
    #[tracing::instrument(skip(self, headers), fields(user_id = Empty))]
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        let Some(token) = bearer_token(headers) else {
            debug!("Request without bearer token");
            return Err(AppError::auth_required());
        };

        match self.verifier.verify_token(token).await {
            Ok(user) => {
                Span::current().record("user_id", user.uid.as_str());
                AppLogger::log_auth_event(&user.uid, "token_verified", true, None);
                Ok(user)
            }
            Err(e) => {
                warn!(code = ?e.code, "Token verification failed");
                Err(e)
            }
        }
    }

    /// Authenticate and require the `admin` claim
    ///
    /// # Errors
    ///
    /// Returns the authentication error, or `PermissionDenied` for non-admins
    pub async fn authenticate_admin(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        let user = self.authenticate(headers).await?;
        if !user.admin {
            AppLogger::log_auth_event(&user.uid, "admin_required", false, Some("missing admin claim"));
            return Err(AppError::permission_denied("Access denied. Admin only."));
        }
        Ok(user)
    }
}

/// Token from `Authorization: Bearer <token>`, if present and non-empty
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

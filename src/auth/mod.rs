// ABOUTME: Identity token verification boundary
// ABOUTME: TokenVerifier trait and the authenticated user extracted from a token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Firebase ID token validation
pub mod firebase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Identity proven by a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Firebase uid
    pub uid: String,
    /// Account email, if the provider supplied one
    pub email: Option<String>,
    /// Whether the provider verified the email
    pub email_verified: bool,
    /// `admin` custom claim
    pub admin: bool,
}

/// Verifies bearer tokens and resolves them to a user
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the identity it carries
    ///
    /// # Errors
    ///
    /// Returns an `AuthInvalid` or `AuthExpired` error for rejected tokens
    async fn verify_token(&self, token: &str) -> AppResult<AuthenticatedUser>;
}

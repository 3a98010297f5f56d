// ABOUTME: Firebase Authentication token validation module
// ABOUTME: Validates Firebase ID tokens using Google's public keys with automatic key caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Firebase Authentication Token Validation
//!
//! - RS256 signature checked against Google's x509 certificates
//! - Keys cached for the `max-age` of the certificate response
//! - Issuer and audience pinned to the configured project
//! - `admin` custom claim surfaced for catalog curation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use x509_parser::prelude::*;

use super::{AuthenticatedUser, TokenVerifier};
use crate::config::environment::FirebaseConfig;
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};

/// Google's Firebase public key endpoint
const FIREBASE_CERTS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

/// Firebase issuer URL prefix (project ID is appended)
const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Minimum cache TTL in seconds (5 minutes)
const MIN_CACHE_TTL_SECS: i64 = 300;

/// Cached Firebase public keys
struct CachedKeys {
    /// Key ID to PEM-encoded public key mapping
    keys: HashMap<String, String>,
    /// When the cache expires
    expires_at: DateTime<Utc>,
}

/// Firebase ID token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseClaims {
    /// Issuer (`https://securetoken.google.com/<project-id>`)
    pub iss: String,
    /// Audience (the Firebase project ID)
    pub aud: String,
    /// Subject (Firebase user UID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// User email (if available)
    pub email: Option<String>,
    /// Whether email is verified
    pub email_verified: Option<bool>,
    /// `admin` custom claim set through the Admin SDK
    #[serde(default)]
    pub admin: Option<bool>,
}

impl From<FirebaseClaims> for AuthenticatedUser {
    fn from(claims: FirebaseClaims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified.unwrap_or(false),
            admin: claims.admin.unwrap_or(false),
        }
    }
}

/// Firebase Authentication handler
///
/// Token validation with key caching; the cache is shared behind an `RwLock`.
pub struct FirebaseAuth {
    config: FirebaseConfig,
    http_client: Client,
    cached_keys: Arc<RwLock<Option<CachedKeys>>>,
}

impl FirebaseAuth {
    /// Create a new Firebase authentication handler
    #[must_use]
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
            cached_keys: Arc::new(RwLock::new(None)),
        }
    }

    /// Check if Firebase authentication is enabled and configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }

    /// Validate a Firebase ID token
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Firebase is not configured
    /// - Token header cannot be decoded or has no key ID
    /// - Public key cannot be found for the token's key ID
    /// - Token signature, expiry, issuer or audience is invalid
    pub async fn validate_token(&self, token: &str) -> AppResult<FirebaseClaims> {
        let project_id = match (&self.config.project_id, self.config.enabled) {
            (Some(project_id), true) => project_id,
            _ => return Err(AppError::config("Firebase authentication is not configured")),
        };

        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Failed to decode Firebase token header");
            AppError::auth_invalid("Invalid token.")
        })?;

        let kid = header.kid.ok_or_else(|| {
            debug!("Firebase token missing key ID (kid) in header");
            AppError::auth_invalid("Invalid token.")
        })?;

        let pem_key = self.get_public_key(&kid).await?;

        let decoding_key = DecodingKey::from_rsa_pem(pem_key.as_bytes()).map_err(|e| {
            warn!(error = %e, kid = %kid, "Failed to create decoding key from PEM");
            AppError::internal(format!("Invalid public key: {e}"))
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[project_id]);
        validation.set_issuer(&[format!("{FIREBASE_ISSUER_PREFIX}{project_id}")]);

        let token_data =
            decode::<FirebaseClaims>(token, &decoding_key, &validation).map_err(|e| {
                debug!(error = %e, "Firebase token validation failed");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::auth_expired(),
                    _ => AppError::auth_invalid("Invalid token."),
                }
            })?;

        debug!(user_id = %token_data.claims.sub, "Firebase token validated");
        Ok(token_data.claims)
    }

    /// Get the public key for a given key ID, refreshing the cache on a miss
    async fn get_public_key(&self, kid: &str) -> AppResult<String> {
        if let Some(key) = self.try_get_cached_key(kid).await {
            return Ok(key);
        }

        self.refresh_keys().await?;

        let cache = self.cached_keys.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.keys.get(kid).cloned())
            .ok_or_else(|| {
                debug!(kid = %kid, "Firebase public key not found for kid");
                AppError::auth_invalid("Invalid token.")
            })
    }

    async fn try_get_cached_key(&self, kid: &str) -> Option<String> {
        let cache = self.cached_keys.read().await;
        cache.as_ref().and_then(|cached| {
            if cached.expires_at > Utc::now() {
                cached.keys.get(kid).cloned()
            } else {
                None
            }
        })
    }

    async fn refresh_keys(&self) -> AppResult<()> {
        info!("Fetching Firebase public keys from Google");

        let response = self
            .http_client
            .get(FIREBASE_CERTS_URL)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch Firebase public keys");
                AppError::external_unavailable(service_names::FIREBASE, e.to_string())
            })?;

        let default_ttl = i64::try_from(self.config.key_cache_ttl_secs).unwrap_or(i64::MAX);
        let cache_ttl = response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(default_ttl)
            .max(MIN_CACHE_TTL_SECS);

        let certs: HashMap<String, String> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Firebase public keys response");
            AppError::external_service(service_names::FIREBASE, e.to_string())
        })?;

        let keys = convert_certs_to_keys(certs)?;
        let expires_at = Utc::now() + Duration::seconds(cache_ttl);
        info!(
            num_keys = keys.len(),
            cache_ttl_secs = cache_ttl,
            "Firebase public keys cached"
        );

        *self.cached_keys.write().await = Some(CachedKeys { keys, expires_at });
        Ok(())
    }
}

#[async_trait]
impl TokenVerifier for FirebaseAuth {
    async fn verify_token(&self, token: &str) -> AppResult<AuthenticatedUser> {
        self.validate_token(token).await.map(AuthenticatedUser::from)
    }
}

fn convert_certs_to_keys(certs: HashMap<String, String>) -> AppResult<HashMap<String, String>> {
    let mut keys = HashMap::with_capacity(certs.len());
    for (kid, cert_pem) in certs {
        match extract_public_key_from_cert(&cert_pem) {
            Ok(public_key_pem) => {
                keys.insert(kid, public_key_pem);
            }
            Err(e) => {
                warn!(kid = %kid, error = %e, "Failed to extract public key from certificate");
            }
        }
    }

    if keys.is_empty() {
        return Err(AppError::external_service(
            service_names::FIREBASE,
            "No valid Firebase public keys found",
        ));
    }

    Ok(keys)
}

/// Parse max-age value from Cache-Control header
///
/// Example: "public, max-age=3600, must-revalidate" -> 3600
fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control
        .split(',')
        .map(str::trim)
        .find_map(|s| s.strip_prefix("max-age="))
        .and_then(|s| s.parse().ok())
}

/// PEM-encode the subject public key of an X.509 certificate
fn extract_public_key_from_cert(cert_pem: &str) -> AppResult<String> {
    let (_, pem) = parse_x509_pem(cert_pem.as_bytes())
        .map_err(|e| AppError::internal(format!("Failed to parse X.509 PEM: {e}")))?;

    let (_, cert) = X509Certificate::from_der(&pem.contents)
        .map_err(|e| AppError::internal(format!("Failed to parse X.509 certificate: {e}")))?;

    let encoded = STANDARD.encode(cert.public_key().raw);
    let body = encoded
        .as_bytes()
        .chunks(64)
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "-----BEGIN PUBLIC KEY-----\n{body}\n-----END PUBLIC KEY-----"
    ))
}

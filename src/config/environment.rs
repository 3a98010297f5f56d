// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HTTP, store, CORS, Firebase and DeepSeek settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default document store location
pub const DEFAULT_STORE_URL: &str = "sqlite:./data/fitplan.db";

/// Default DeepSeek API base URL
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

/// Default DeepSeek chat model
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Environment type for logging and security decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Document store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `memory://` or `sqlite:<path>`
    pub url: String,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether every origin is allowed
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Firebase Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Firebase project ID (required for token validation)
    pub project_id: Option<String>,
    /// Whether Firebase authentication is enabled
    pub enabled: bool,
    /// Lower bound for the public key cache lifetime in seconds
    pub key_cache_ttl_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            enabled: false,
            key_cache_ttl_secs: 3600,
        }
    }
}

impl FirebaseConfig {
    /// Returns `true` if Firebase is enabled and has a project ID configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.enabled && self.project_id.is_some()
    }

    /// Load Firebase configuration from environment
    ///
    /// Environment variables:
    /// - `FIREBASE_PROJECT_ID` - Firebase project ID (required for token validation)
    /// - `FIREBASE_ENABLED` - Enable Firebase authentication (default: true when a project ID is set)
    /// - `FIREBASE_KEY_CACHE_TTL_SECS` - Public key cache TTL (default: 3600)
    #[must_use]
    pub fn from_env() -> Self {
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        let enabled = project_id.is_some()
            && env_var_or("FIREBASE_ENABLED", "true")
                .parse()
                .unwrap_or(true);

        if enabled {
            info!(
                project_id = project_id.as_deref().unwrap_or("(not set)"),
                "Firebase authentication enabled"
            );
        }

        Self {
            project_id,
            enabled,
            key_cache_ttl_secs: env::var("FIREBASE_KEY_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
        }
    }
}

/// DeepSeek chat completions configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DeepSeekConfig {
    /// API key; generation is disabled without one
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_DEEPSEEK_BASE_URL.to_owned(),
            model: DEFAULT_DEEPSEEK_MODEL.to_owned(),
            connect_timeout_secs: 30,
            request_timeout_secs: 120,
        }
    }
}

impl DeepSeekConfig {
    /// Whether an API key is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Document store
    pub store: StoreConfig,
    /// CORS
    pub cors: CorsConfig,
    /// Firebase token validation
    pub firebase: FirebaseConfig,
    /// LLM generation
    pub deepseek: DeepSeekConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            store: StoreConfig {
                url: env_var_or("FITPLAN_STORE_URL", DEFAULT_STORE_URL),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            firebase: FirebaseConfig::from_env(),
            deepseek: DeepSeekConfig {
                api_key: env::var("DEEPSEEK_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                base_url: env_var_or("DEEPSEEK_BASE_URL", DEFAULT_DEEPSEEK_BASE_URL),
                model: env_var_or("DEEPSEEK_MODEL", DEFAULT_DEEPSEEK_MODEL),
                connect_timeout_secs: env_var_or("DEEPSEEK_CONNECT_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid DEEPSEEK_CONNECT_TIMEOUT_SECS value")?,
                request_timeout_secs: env_var_or("DEEPSEEK_REQUEST_TIMEOUT_SECS", "120")
                    .parse()
                    .context("Invalid DEEPSEEK_REQUEST_TIMEOUT_SECS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for values the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP_PORT must be greater than zero"));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(anyhow!("CORS_ALLOWED_ORIGINS must list at least one origin"));
        }

        if !self.firebase.is_configured() {
            warn!("Firebase is not configured; authenticated routes will reject every request");
        }

        if !self.deepseek.is_configured() {
            warn!("DEEPSEEK_API_KEY is not set; plan generation is disabled");
        }

        if self.environment.is_production() && self.cors.allows_any_origin() {
            warn!("CORS allows any origin in production");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitPlan Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Store: {}\n\
             - CORS Origins: {}\n\
             - Firebase Auth: {}\n\
             - Plan Generation: {}",
            self.http_port,
            self.environment,
            self.store.url,
            self.cors.allowed_origins.join(", "),
            if self.firebase.is_configured() {
                "Enabled"
            } else {
                "Disabled"
            },
            if self.deepseek.is_configured() {
                "Enabled"
            } else {
                "Disabled"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

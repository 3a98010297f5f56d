// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides fixed clocks, a failure-injecting store, static token verification and resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitplan_server`

use std::collections::HashSet;
use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fitplan_server::{
    auth::{AuthenticatedUser, TokenVerifier},
    clock::Clock,
    config::{
        CorsConfig, DeepSeekConfig, Environment, FirebaseConfig, ServerConfig, StoreConfig,
    },
    errors::{AppError, AppResult},
    llm::LlmProvider,
    resources::ServerResources,
    store::{memory::InMemoryStore, Document, DocumentStore, Query, StoreError, StoreResult},
};
use serde_json::Value;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Noon UTC on the given day
pub fn at_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Clock that only moves when a test moves it
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Store operation a test can make fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Set,
    Update,
    Delete,
    Add,
    Query,
}

/// In-memory store that fails chosen operations on chosen collections
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    failures: Mutex<HashSet<(StoreOp, String)>>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Shared view of the data, unaffected by injected failures
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    pub fn fail(&self, op: StoreOp, collection: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert((op, collection.to_owned()));
    }

    pub fn fail_everything(&self, collection: &str) {
        for op in [
            StoreOp::Get,
            StoreOp::Set,
            StoreOp::Update,
            StoreOp::Delete,
            StoreOp::Add,
            StoreOp::Query,
        ] {
            self.fail(op, collection);
        }
    }

    pub fn heal(&self) {
        self.failures.lock().unwrap().clear();
    }

    fn check(&self, op: StoreOp, collection: &str) -> StoreResult<()> {
        if self
            .failures
            .lock()
            .unwrap()
            .contains(&(op, collection.to_owned()))
        {
            return Err(StoreError::Unavailable(format!(
                "injected {op:?} failure on {collection}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Value> {
        self.check(StoreOp::Get, collection)?;
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.check(StoreOp::Set, collection)?;
        self.inner.set(collection, id, data).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> StoreResult<()> {
        self.check(StoreOp::Update, collection)?;
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check(StoreOp::Delete, collection)?;
        self.inner.delete(collection, id).await
    }

    async fn add(&self, collection: &str, data: Value) -> StoreResult<String> {
        self.check(StoreOp::Add, collection)?;
        self.inner.add(collection, data).await
    }

    async fn query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>> {
        self.check(StoreOp::Query, collection)?;
        self.inner.query(collection, query).await
    }

    fn backend_name(&self) -> &'static str {
        "flaky-memory"
    }
}

/// Token accepted for a regular user: `user:<uid>`
pub fn user_token(uid: &str) -> String {
    format!("user:{uid}")
}

/// Token accepted for an admin user: `admin:<uid>`
pub fn admin_token(uid: &str) -> String {
    format!("admin:{uid}")
}

/// Email assigned to every test user
pub fn email_for(uid: &str) -> String {
    format!("{uid}@example.com")
}

/// Verifier that accepts `user:<uid>` and `admin:<uid>` tokens
pub struct StaticTokenVerifier;

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify_token(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let (admin, uid) = if let Some(uid) = token.strip_prefix("admin:") {
            (true, uid)
        } else if let Some(uid) = token.strip_prefix("user:") {
            (false, uid)
        } else {
            return Err(AppError::auth_invalid("Invalid token."));
        };

        Ok(AuthenticatedUser {
            uid: uid.to_owned(),
            email: Some(email_for(uid)),
            email_verified: true,
            admin,
        })
    }
}

/// Test user as the auth layer would produce it
pub fn test_user(uid: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        uid: uid.to_owned(),
        email: Some(email_for(uid)),
        email_verified: true,
        admin: false,
    }
}

/// Configuration suitable for in-process tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8081,
        environment: Environment::Testing,
        store: StoreConfig {
            url: "memory://".to_owned(),
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_owned()],
        },
        firebase: FirebaseConfig::default(),
        deepseek: DeepSeekConfig::default(),
    }
}

/// Server resources over `store` with static token verification
pub fn create_test_resources(
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    llm: Option<Arc<dyn LlmProvider>>,
) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(
        Arc::new(test_config()),
        store,
        clock,
        Arc::new(StaticTokenVerifier),
        llm,
    ))
}

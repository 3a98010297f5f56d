// ABOUTME: Shared server state handed to every route handler
// ABOUTME: Wires the store, clock, auth, and domain services together once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::catalog::PlanCatalog;
use crate::clock::Clock;
use crate::config::ServerConfig;
use crate::constants::service_names::DEEPSEEK;
use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;
use crate::middleware::AuthMiddleware;
use crate::progress::ProgressEngine;
use crate::services::{PlanGenerator, PlanLibrary, ProfileService};
use crate::store::DocumentStore;

/// Everything a request handler needs, shared behind an `Arc`
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Document store handle
    pub store: Arc<dyn DocumentStore>,
    /// Bearer token gate
    pub auth: AuthMiddleware,
    /// Progress and achievements
    pub progress: ProgressEngine,
    /// Curated and submitted plans
    pub catalog: PlanCatalog,
    /// The user's saved plans
    pub plans: PlanLibrary,
    /// Profiles and settings
    pub profiles: ProfileService,
    generator: Option<PlanGenerator>,
}

impl ServerResources {
    /// Build all services over one store and clock
    ///
    /// Generation endpoints are disabled when `llm` is `None`.
    #[must_use]
    pub fn new(
        config: Arc<ServerConfig>,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn TokenVerifier>,
        llm: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let progress = ProgressEngine::new(store.clone(), clock.clone());
        let plans = PlanLibrary::new(store.clone(), clock.clone());
        let profiles =
            ProfileService::new(store.clone(), clock.clone(), plans.clone(), progress.clone());

        Self {
            config,
            auth: AuthMiddleware::new(verifier),
            catalog: PlanCatalog::new(store.clone(), clock),
            progress,
            plans,
            profiles,
            generator: llm.map(PlanGenerator::new),
            store,
        }
    }

    /// The plan generator
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceUnavailable` when no generation provider is configured
    pub fn generator(&self) -> AppResult<&PlanGenerator> {
        self.generator.as_ref().ok_or_else(|| {
            AppError::external_unavailable(DEEPSEEK, "Plan generation is not configured")
        })
    }
}

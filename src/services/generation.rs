// ABOUTME: LLM-backed generation of workout plans, meal plans, and fitness advice
// ABOUTME: Renders prompts from the user profile and returns the provider's text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, ChatRequest, LlmProvider};
use crate::models::{UserProfile, UserSettings};

/// Longest advice question accepted, in characters
const MAX_QUESTION_CHARS: usize = 2000;

/// Drafts plans and advice through an [`LlmProvider`]
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl PlanGenerator {
    /// Create a generator using `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Personalized 7-day workout plan
    ///
    /// # Errors
    ///
    /// Propagates provider failures
    #[instrument(skip_all, fields(user.id = %profile.uid))]
    pub async fn generate_workout_plan(&self, profile: &UserProfile) -> AppResult<String> {
        self.run("workout_plan", prompts::workout_plan_request(profile))
            .await
    }

    /// Personalized 7-day meal plan
    ///
    /// # Errors
    ///
    /// Propagates provider failures
    #[instrument(skip_all, fields(user.id = %profile.uid))]
    pub async fn generate_meal_plan(
        &self,
        profile: &UserProfile,
        settings: &UserSettings,
    ) -> AppResult<String> {
        self.run("meal_plan", prompts::meal_plan_request(profile, settings))
            .await
    }

    /// Answer a fitness question for this user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or oversized question and
    /// propagates provider failures
    #[instrument(skip_all, fields(user.id = %profile.uid))]
    pub async fn fitness_advice(&self, profile: &UserProfile, question: &str) -> AppResult<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::invalid_input("question is required"));
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(AppError::invalid_input(format!(
                "question must be at most {MAX_QUESTION_CHARS} characters"
            )));
        }
        self.run("advice", prompts::advice_request(profile, question))
            .await
    }

    async fn run(&self, task: &str, request: ChatRequest) -> AppResult<String> {
        let response = self.provider.complete(&request).await?;
        if response.content.trim().is_empty() {
            return Err(AppError::external_service(
                self.provider.name(),
                "returned an empty response",
            ));
        }
        info!(
            task,
            provider = self.provider.name(),
            model = %response.model,
            total_tokens = response.usage.map(|u| u.total_tokens),
            "Generation completed"
        );
        Ok(response.content)
    }
}

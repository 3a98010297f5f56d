// ABOUTME: HTTP-level tests for the FitPlan router: auth gates, envelopes and status codes
// ABOUTME: Requests go through the assembled router in-process with static tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;
mod helpers;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use common::{
    admin_token, at_noon, create_test_resources, email_for, user_token, FixedClock, FlakyStore,
    StoreOp,
};
use fitplan_server::{
    constants::collections::{COMPLETIONS, USERS, USER_STATS},
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    routes::users::OFFLINE_MODE_MESSAGE,
    server::build_router,
    store::DocumentStore,
};
use helpers::axum_test::TestRequest;
use serde_json::json;

/// Provider that answers every request with the same text
struct CannedProvider {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedProvider {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_owned(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn default_model(&self) -> &str {
        "canned-1"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        Ok(ChatResponse {
            content: self.answer.clone(),
            model: "canned-1".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

struct TestApp {
    router: Router,
    store: Arc<FlakyStore>,
    clock: Arc<FixedClock>,
}

fn app_with(llm: Option<Arc<dyn LlmProvider>>) -> TestApp {
    let store = FlakyStore::new();
    let clock = FixedClock::new(at_noon(2025, 5, 10));
    let resources = create_test_resources(store.clone(), clock.clone(), llm);
    TestApp {
        router: build_router(resources),
        store,
        clock,
    }
}

fn app() -> TestApp {
    app_with(None)
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let app = app();

    let body = TestRequest::get("/health")
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let body = TestRequest::get("/ready")
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["generation"], false);
}

#[tokio::test]
async fn test_missing_token_is_401_and_bad_token_is_403() {
    let app = app();

    let body = TestRequest::get("/api/users/profile")
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Access denied. No token provided.");

    let body = TestRequest::get("/api/users/progress")
        .bearer("forged")
        .send(app.router)
        .await
        .expect_json(StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_profile_is_created_on_first_read_and_updated() {
    let app = app();
    let token = user_token("ana");

    let body = TestRequest::get("/api/users/profile")
        .bearer(&token)
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["uid"], "ana");
    assert_eq!(body["data"]["email"], email_for("ana"));
    assert_eq!(body["data"]["settings"]["measurementSystem"], "metric");

    let body = TestRequest::put("/api/users/profile")
        .bearer(&token)
        .json(&json!({"age": 34, "fitnessGoals": "Run a half marathon"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["age"], 34);

    TestRequest::put("/api/users/profile")
        .bearer(&token)
        .json(&json!({"age": 0}))
        .send(app.router)
        .await
        .expect_json(StatusCode::BAD_REQUEST);

    let stored = app.store.inner().get(USERS, "ana").await.unwrap();
    assert_eq!(stored["fitnessGoals"], "Run a half marathon");
}

#[tokio::test]
async fn test_preferences_fill_defaults() {
    let app = app();
    let token = user_token("ana");

    let body = TestRequest::put("/api/users/preferences")
        .bearer(&token)
        .json(&json!({"darkMode": true, "mealPreferences": {"calories": 2200}}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["darkMode"], true);
    assert_eq!(body["data"]["workoutIntensity"], "medium");
    assert_eq!(body["data"]["mealPreferences"]["macroPreferences"], "balanced");

    let body = TestRequest::get("/api/users/preferences")
        .bearer(&token)
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["mealPreferences"]["calories"], 2200);
}

#[tokio::test]
async fn test_recording_progress_returns_stats_and_awards() {
    let app = app();
    let token = user_token("ana");

    let body = TestRequest::post("/api/users/progress")
        .bearer(&token)
        .json(&json!({"type": "workout", "planId": "curated-workout-core"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["stats"]["workoutStreak"], 1);
    assert_eq!(body["data"]["newlyAwarded"][0]["achievementId"], "first-workout");
    assert_eq!(body["data"]["degraded"], false);
    assert!(body.get("message").is_none());

    app.clock.advance_days(1);
    TestRequest::post("/api/users/progress")
        .bearer(&token)
        .json(&json!({"kind": "workout"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);

    let body = TestRequest::get("/api/users/progress")
        .bearer(&token)
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["workoutStreak"], 2);
    assert_eq!(body["data"]["totalWorkouts"], 2);

    let body = TestRequest::get("/api/users/achievements")
        .bearer(&token)
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "first-workout");
    assert_eq!(body["data"][0]["icon"], "🏃");
}

#[tokio::test]
async fn test_degraded_completion_carries_offline_message() {
    let app = app();
    app.store.fail(StoreOp::Add, COMPLETIONS);

    let body = TestRequest::post("/api/users/progress")
        .bearer(&user_token("ana"))
        .json(&json!({"type": "meal"}))
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], OFFLINE_MODE_MESSAGE);
    assert_eq!(body["data"]["degraded"], true);
    assert_eq!(body["data"]["stats"]["totalMeals"], 1);
}

#[tokio::test]
async fn test_invalid_completion_kind_is_400() {
    let app = app();

    let body = TestRequest::post("/api/users/progress")
        .bearer(&user_token("ana"))
        .json(&json!({"type": "yoga"}))
        .send(app.router)
        .await
        .expect_json(StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_progress_outage_is_503() {
    let app = app();
    app.store.fail(StoreOp::Get, USER_STATS);
    app.store.fail(StoreOp::Query, COMPLETIONS);

    let body = TestRequest::get("/api/users/progress")
        .bearer(&user_token("ana"))
        .send(app.router)
        .await
        .expect_json(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "RESOURCE_UNAVAILABLE");
}

#[tokio::test]
async fn test_saved_plans_are_private() {
    let app = app();

    let body = TestRequest::post("/api/workouts")
        .bearer(&user_token("ana"))
        .json(&json!({
            "title": "Morning routine",
            "description": "Before work",
            "content": {"exercises": [{"name": "Squats", "sets": 3, "reps": "12"}]}
        }))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_owned();
    assert_eq!(body["data"]["source"], "manual");

    let body = TestRequest::get("/api/workouts")
        .bearer(&user_token("ana"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    TestRequest::get(&format!("/api/workouts/{id}"))
        .bearer(&user_token("bo"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::NOT_FOUND);

    TestRequest::delete(&format!("/api/workouts/{id}"))
        .bearer(&user_token("bo"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::NOT_FOUND);

    let body = TestRequest::put(&format!("/api/workouts/{id}"))
        .bearer(&user_token("ana"))
        .json(&json!({"title": "Sunrise routine"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["title"], "Sunrise routine");
    assert_eq!(body["data"]["description"], "Before work");

    TestRequest::delete(&format!("/api/workouts/{id}"))
        .bearer(&user_token("ana"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);

    let body = TestRequest::get("/api/meals")
        .bearer(&user_token("ana"))
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generation_disabled_without_provider() {
    let app = app();

    let body = TestRequest::post("/api/workouts/generate")
        .bearer(&user_token("ana"))
        .send(app.router)
        .await
        .expect_json(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_generated_meal_plan_is_saved_with_profile_context() {
    let provider = CannedProvider::new("Day 1: Oats with berries");
    let app = app_with(Some(provider.clone()));
    let token = user_token("ana");

    TestRequest::put("/api/users/profile")
        .bearer(&token)
        .json(&json!({"dietaryRestrictions": "Vegetarian", "weight": 62.5}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);

    let body = TestRequest::post("/api/meals/generate")
        .bearer(&token)
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::CREATED);
    assert_eq!(body["data"]["source"], "generated");
    assert_eq!(body["data"]["kind"], "meal");
    assert_eq!(body["data"]["content"], "Day 1: Oats with berries");
    assert!(provider.last_prompt().contains("Vegetarian"));

    let body = TestRequest::get("/api/meals")
        .bearer(&token)
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Personalized 7-Day Meal Plan");
}

#[tokio::test]
async fn test_advice_validates_question() {
    let provider = CannedProvider::new("Stretch after every run.");
    let app = app_with(Some(provider));
    let token = user_token("ana");

    let body = TestRequest::post("/api/users/advice")
        .bearer(&token)
        .json(&json!({"question": "How do I avoid shin splints?"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["answer"], "Stretch after every run.");

    TestRequest::post("/api/users/advice")
        .bearer(&token)
        .json(&json!({"question": "   "}))
        .send(app.router)
        .await
        .expect_json(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_listing_and_admin_approval() {
    let app = app();

    let body = TestRequest::get("/api/catalog/workouts?difficulty=advanced")
        .bearer(&user_token("ana"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], "curated-workout-hiit");

    let body = TestRequest::post("/api/catalog/submissions")
        .bearer(&user_token("ana"))
        .json(&json!({
            "kind": "workout",
            "title": "Stair sprints",
            "difficulty": "advanced",
            "duration": "25 min",
            "exercises": "Stair sprint, 8, 1 flight\nWalk down, 8, 1 flight"
        }))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::CREATED);
    assert_eq!(body["message"], "Plan submitted for review");
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let body = TestRequest::post(&format!("/api/catalog/workouts/{id}/approve"))
        .bearer(&user_token("ana"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "PERMISSION_DENIED");

    let body = TestRequest::post(&format!("/api/catalog/workouts/{id}/approve"))
        .bearer(&admin_token("root"))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    let body = TestRequest::get(&format!("/api/catalog/workout/{id}"))
        .bearer(&user_token("bo"))
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["data"]["title"], "Stair sprints");
}

#[tokio::test]
async fn test_malformed_submission_is_400() {
    let app = app();

    let body = TestRequest::post("/api/catalog/submissions")
        .bearer(&user_token("ana"))
        .json(&json!({
            "kind": "workout",
            "title": "Broken",
            "difficulty": "beginner",
            "duration": "10 min",
            "exercises": "Squats 3 12"
        }))
        .send(app.router)
        .await
        .expect_json(StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_account_deletion_requires_matching_email() {
    let app = app();
    let token = user_token("ana");

    TestRequest::post("/api/users/progress")
        .bearer(&token)
        .json(&json!({"type": "workout"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::OK);

    TestRequest::delete("/api/users/account")
        .bearer(&token)
        .json(&json!({"confirmationEmail": "someone@else.com"}))
        .send(app.router.clone())
        .await
        .expect_json(StatusCode::BAD_REQUEST);
    assert!(app.store.inner().get(USER_STATS, "ana").await.is_ok());

    let body = TestRequest::delete("/api/users/account")
        .bearer(&token)
        .json(&json!({"confirmationEmail": email_for("ana")}))
        .send(app.router)
        .await
        .expect_json(StatusCode::OK);
    assert_eq!(body["message"], "Your account has been deleted.");
    assert!(app.store.inner().get(USER_STATS, "ana").await.is_err());
    assert_eq!(app.store.inner().count(COMPLETIONS).await, 0);
}

// ABOUTME: Integration tests for the plan catalog: listing, mock fallback, submission and approval
// ABOUTME: Runs PlanCatalog over the in-memory store with injected query failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use common::{at_noon, init_test_logging, FixedClock, FlakyStore, StoreOp};
use fitplan_server::{
    catalog::{mock, CatalogPlan, MealFilters, PlanCatalog, WorkoutFilters},
    constants::collections::{MEAL_PLANS, WORKOUT_PLANS},
    errors::ErrorCode,
    models::{PlanKind, PlanStatus},
    store::DocumentStore,
};
use serde_json::{json, to_value};

fn catalog() -> (PlanCatalog, Arc<FlakyStore>) {
    init_test_logging();
    let store = FlakyStore::new();
    let catalog = PlanCatalog::new(store.clone(), FixedClock::new(at_noon(2025, 4, 2)));
    (catalog, store)
}

fn workout_filters(difficulty: Option<&str>, duration: Option<&str>) -> WorkoutFilters {
    WorkoutFilters {
        difficulty: difficulty.map(str::to_owned),
        duration: duration.map(str::to_owned),
    }
}

fn workout_submission() -> serde_json::Value {
    json!({
        "kind": "workout",
        "title": "Lunch Break Circuit",
        "description": "Quick circuit for busy days",
        "difficulty": "beginner",
        "duration": "20 min",
        "exercises": "Jumping Jacks, 3, 30 seconds\n\nLunges, 3, 10 each leg\nPlank, 2, 45 seconds"
    })
}

#[tokio::test]
async fn test_empty_catalog_serves_curated_plans() {
    let (catalog, _store) = catalog();

    let workouts = catalog.list_workout_plans(&WorkoutFilters::default()).await;
    assert_eq!(workouts.len(), mock::curated_workouts().len());

    let meals = catalog.list_meal_plans(&MealFilters::default()).await;
    assert_eq!(meals.len(), mock::curated_meals().len());
}

#[tokio::test]
async fn test_fallback_honors_filters() {
    let (catalog, _store) = catalog();

    let beginner = catalog
        .list_workout_plans(&workout_filters(Some("beginner"), None))
        .await;
    assert!(!beginner.is_empty());
    assert!(beginner.iter().all(|p| p.body.difficulty == "beginner"));

    let short_beginner = catalog
        .list_workout_plans(&workout_filters(Some("beginner"), Some("15 min")))
        .await;
    assert_eq!(short_beginner.len(), 1);
    assert_eq!(short_beginner[0].id, "curated-workout-core");

    let everything = catalog
        .list_workout_plans(&workout_filters(Some("all"), Some("all")))
        .await;
    assert_eq!(everything.len(), mock::curated_workouts().len());
}

#[tokio::test]
async fn test_store_failure_serves_curated_plans() {
    let (catalog, store) = catalog();
    store.fail(StoreOp::Query, MEAL_PLANS);

    let meals = catalog
        .list_meal_plans(&MealFilters {
            dietary_category: Some("vegetarian".to_owned()),
        })
        .await;

    assert!(!meals.is_empty());
    assert!(meals.iter().all(|m| m.body.dietary_category == "vegetarian"));
}

#[tokio::test]
async fn test_stored_plans_are_approved_only_and_ranked() {
    let (catalog, store) = catalog();
    let mut seeded = mock::curated_workouts();
    seeded.truncate(3);
    for entry in &seeded {
        store
            .inner()
            .set(WORKOUT_PLANS, &entry.id, to_value(entry).unwrap())
            .await
            .unwrap();
    }
    store
        .inner()
        .set(
            WORKOUT_PLANS,
            "pending-one",
            json!({
                "status": "pending",
                "title": "Not yet",
                "createdAt": "2025-04-01T00:00:00Z",
                "avgRating": 5.0,
                "difficulty": "beginner",
                "duration": "10 min",
                "exercises": [{"name": "Burpees", "sets": 3, "reps": 10}]
            }),
        )
        .await
        .unwrap();

    let listed = catalog.list_workout_plans(&WorkoutFilters::default()).await;

    let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "curated-workout-full-body",
            "curated-workout-leg-day",
            "curated-workout-upper-body"
        ]
    );
}

#[tokio::test]
async fn test_submission_is_parsed_and_pending() {
    let (catalog, store) = catalog();

    let plan = catalog
        .submit_plan("author-1", PlanKind::Workout, workout_submission())
        .await
        .unwrap();

    let CatalogPlan::Workout(entry) = &plan else {
        panic!("expected a workout entry, got {plan:?}");
    };
    assert_eq!(entry.status, PlanStatus::Pending);
    assert_eq!(entry.owner_id.as_deref(), Some("author-1"));
    assert_eq!(entry.body.exercises.len(), 3);
    assert_eq!(entry.body.exercises[1].reps, "10 each leg");

    let stored = store.inner().get(WORKOUT_PLANS, plan.id()).await.unwrap();
    assert_eq!(stored["status"], "pending");
    assert_eq!(stored["ownerId"], "author-1");

    // pending entries stay out of the listing
    let listed = catalog.list_workout_plans(&WorkoutFilters::default()).await;
    assert!(listed.iter().all(|p| p.id != plan.id()));
}

#[tokio::test]
async fn test_malformed_exercise_line_is_invalid_format() {
    let (catalog, store) = catalog();
    let mut body = workout_submission();
    body["exercises"] = json!("Squats, 3, 12\nDeadlifts, heavy, 5");

    let err = catalog
        .submit_plan("author-1", PlanKind::Workout, body)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert!(err.message.contains("line 2"), "{}", err.message);
    assert_eq!(store.inner().count(WORKOUT_PLANS).await, 0);
}

#[tokio::test]
async fn test_meal_submission_requires_valid_meal_json() {
    let (catalog, _store) = catalog();

    let err = catalog
        .submit_plan(
            "author-1",
            PlanKind::Meal,
            json!({
                "title": "Green week",
                "dietaryCategory": "vegan",
                "meals": "[{\"name\": \"Tofu bowl\""
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    let err = catalog
        .submit_plan("author-1", PlanKind::Meal, json!({"title": "No meals"}))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let plan = catalog
        .submit_plan(
            "author-1",
            PlanKind::Meal,
            json!({
                "title": "Green week",
                "dietaryCategory": "vegan",
                "meals": "[{\"type\": \"Lunch\", \"name\": \"Tofu bowl\", \"calories\": 520}]"
            }),
        )
        .await
        .unwrap();
    let CatalogPlan::Meal(entry) = plan else {
        panic!("expected a meal entry");
    };
    assert_eq!(entry.body.meals[0].name, "Tofu bowl");
}

#[tokio::test]
async fn test_approval_makes_submission_visible() {
    let (catalog, _store) = catalog();
    let submitted = catalog
        .submit_plan("author-1", PlanKind::Workout, workout_submission())
        .await
        .unwrap();
    let id = submitted.id().to_owned();

    let approved = catalog.approve_plan(PlanKind::Workout, &id).await.unwrap();
    assert_eq!(approved.status(), PlanStatus::Approved);

    // idempotent
    let again = catalog.approve_plan(PlanKind::Workout, &id).await.unwrap();
    assert_eq!(again.status(), PlanStatus::Approved);

    let listed = catalog
        .list_workout_plans(&workout_filters(Some("beginner"), None))
        .await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[tokio::test]
async fn test_unknown_plan_is_not_found() {
    let (catalog, _store) = catalog();

    let err = catalog
        .approve_plan(PlanKind::Meal, "missing")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Meal plan missing not found");
}

// ABOUTME: Document models for progress tracking, plan catalogs and user profiles
// ABOUTME: Re-exports the camelCase document types shared by every service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Data Models
//!
//! Every type here is serialized as camelCase JSON, the field naming used by
//! the document store and by the HTTP API.

mod plan;
mod progress;
mod user;

pub mod timestamp;

pub use plan::{
    CatalogEntry, Exercise, Meal, MealCatalogEntry, MealPlanBody, PlanKind, PlanSource, PlanStatus,
    SavedPlan, WorkoutCatalogEntry, WorkoutPlanBody,
};
pub use progress::{
    AwardedAchievement, CompletionEvent, CompletionKind, EarnedAchievement, UserProgressStats,
};
pub use user::{MealPreferences, ProfileUpdate, UserProfile, UserSettings};

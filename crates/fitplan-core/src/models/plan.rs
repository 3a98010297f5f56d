// ABOUTME: Workout and meal plan documents for the catalog and the user's saved plans
// ABOUTME: PlanKind routing between collections, catalog entry bodies, and saved plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::collections;
use crate::errors::AppError;

/// Workout or meal plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Exercise routine
    Workout,
    /// Nutrition plan
    Meal,
}

impl PlanKind {
    /// Collection holding curated and submitted plans of this kind
    #[must_use]
    pub const fn catalog_collection(&self) -> &'static str {
        match self {
            Self::Workout => collections::WORKOUT_PLANS,
            Self::Meal => collections::MEAL_PLANS,
        }
    }

    /// Collection holding users' private plans of this kind
    #[must_use]
    pub const fn library_collection(&self) -> &'static str {
        match self {
            Self::Workout => collections::USER_WORKOUTS,
            Self::Meal => collections::USER_MEALS,
        }
    }

    /// Human label used in messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Workout => "Workout plan",
            Self::Meal => "Meal plan",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workout => f.write_str("workout"),
            Self::Meal => f.write_str("meal"),
        }
    }
}

impl FromStr for PlanKind {
    type Err = AppError;

    /// Accepts singular and plural forms, as used in URL paths
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workout" | "workouts" => Ok(Self::Workout),
            "meal" | "meals" => Ok(Self::Meal),
            other => Err(AppError::invalid_input(format!(
                "Invalid plan type '{other}', expected 'workout' or 'meal'"
            ))),
        }
    }
}

/// Curation state of a catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Submitted by a user, awaiting review
    Pending,
    /// Visible in the catalog
    Approved,
}

impl PlanStatus {
    /// Stored value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

/// Single exercise line of a workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions, kept as text so values like `30 seconds` survive
    #[serde(deserialize_with = "text_or_number")]
    pub reps: String,
}

/// Single meal of a meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Breakfast, Lunch, Dinner, Snack
    #[serde(rename = "type", default)]
    pub meal_type: String,
    /// Meal name
    pub name: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
}

/// Body of a workout catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanBody {
    /// beginner, intermediate, advanced
    pub difficulty: String,
    /// Session length label, e.g. `30 min`
    pub duration: String,
    /// Exercises in order
    pub exercises: Vec<Exercise>,
}

/// Body of a meal catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanBody {
    /// vegetarian, vegan, keto, high-protein, ...
    pub dietary_category: String,
    /// Meals in order
    pub meals: Vec<Meal>,
}

/// Curated or user-submitted plan visible through the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry<B> {
    /// Document id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Submitting user; `None` for curated entries
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Curation state
    pub status: PlanStatus,
    /// Mean rating
    #[serde(default)]
    pub avg_rating: f64,
    /// Number of ratings
    #[serde(default)]
    pub total_ratings: u32,
    /// Title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Creation time
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Kind-specific content
    #[serde(flatten)]
    pub body: B,
}

/// Workout entry in the catalog
pub type WorkoutCatalogEntry = CatalogEntry<WorkoutPlanBody>;

/// Meal entry in the catalog
pub type MealCatalogEntry = CatalogEntry<MealPlanBody>;

/// How a saved plan came to be
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Written or copied by the user
    Manual,
    /// Drafted by the LLM
    Generated,
}

/// A plan in the user's private library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    /// Document id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Workout or meal
    pub kind: PlanKind,
    /// Title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Free text (generated plans) or structured JSON (manual plans)
    #[serde(default)]
    pub content: Value,
    /// Manual or generated
    pub source: PlanSource,
    /// Creation time
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(DeError::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

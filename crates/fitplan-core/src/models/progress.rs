// ABOUTME: Progress tracking documents: aggregate stats, completion events, achievements
// ABOUTME: CompletionKind parsing and the zeroed starting point for new users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// What the user completed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// A workout session
    Workout,
    /// A logged meal
    Meal,
}

impl CompletionKind {
    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Meal => "meal",
        }
    }
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workout" => Ok(Self::Workout),
            "meal" => Ok(Self::Meal),
            other => Err(AppError::invalid_input(format!(
                "Invalid completion type '{other}', expected 'workout' or 'meal'"
            ))),
        }
    }
}

/// Per-user aggregate progress, one document per uid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressStats {
    /// Workouts completed over the account lifetime
    #[serde(default)]
    pub total_workouts: u32,
    /// Meals logged over the account lifetime
    #[serde(default)]
    pub total_meals: u32,
    /// Consecutive calendar days with at least one workout
    #[serde(default)]
    pub workout_streak: u32,
    /// UTC day of the most recent workout
    #[serde(default)]
    pub last_workout_date: Option<NaiveDate>,
    /// Share of the weekly meal target reached, 0 to 100
    #[serde(default)]
    pub meal_adherence: u8,
    /// Last time the record changed
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserProgressStats {
    /// Zeroed stats for a user with no history
    #[must_use]
    pub const fn empty(now: DateTime<Utc>) -> Self {
        Self {
            total_workouts: 0,
            total_meals: 0,
            workout_streak: 0,
            last_workout_date: None,
            meal_adherence: 0,
            updated_at: now,
        }
    }
}

/// Immutable record of a single completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    /// Owner of the event
    pub user_id: String,
    /// Workout or meal plan the completion refers to
    pub reference_id: String,
    /// When it happened
    #[serde(with = "super::timestamp")]
    pub completed_at: DateTime<Utc>,
    /// Workout or meal
    pub kind: CompletionKind,
}

/// Achievement granted to a user, stored once per (user, achievement)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardedAchievement {
    /// Definition identifier
    pub achievement_id: String,
    /// Recipient
    pub user_id: String,
    /// Award time
    #[serde(with = "super::timestamp")]
    pub earned_at: DateTime<Utc>,
}

impl AwardedAchievement {
    /// Deterministic document id, which makes repeated awards idempotent
    #[must_use]
    pub fn document_id(user_id: &str, achievement_id: &str) -> String {
        format!("{user_id}_{achievement_id}")
    }
}

/// Achievement as presented to the client: definition joined with its award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedAchievement {
    /// Definition identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// What the user did to earn it
    pub description: String,
    /// Emoji badge
    pub icon: String,
    /// Award time
    #[serde(with = "super::timestamp")]
    pub earned_at: DateTime<Utc>,
}

// ABOUTME: User profile and settings documents
// ABOUTME: Settings defaults and partial profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calorie and macro preferences used when drafting meal plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPreferences {
    /// Daily calorie target
    #[serde(default)]
    pub calories: Option<u32>,
    /// balanced, high-protein, low-carb, ...
    #[serde(default = "default_macro_preferences")]
    pub macro_preferences: String,
}

impl Default for MealPreferences {
    fn default() -> Self {
        Self {
            calories: None,
            macro_preferences: default_macro_preferences(),
        }
    }
}

/// Per-user application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Receive email notifications
    pub email_notifications: bool,
    /// low, medium, high
    pub workout_intensity: String,
    /// Meal generation preferences
    pub meal_preferences: MealPreferences,
    /// UI theme
    pub dark_mode: bool,
    /// UI language
    pub language: String,
    /// metric or imperial
    pub measurement_system: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email_notifications: false,
            workout_intensity: "medium".to_owned(),
            meal_preferences: MealPreferences::default(),
            dark_mode: false,
            language: "english".to_owned(),
            measurement_system: "metric".to_owned(),
        }
    }
}

/// Profile document, one per uid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Firebase uid
    pub uid: String,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Account email
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Free-text goals
    #[serde(default)]
    pub fitness_goals: Option<String>,
    /// sedentary, light, moderate, active, very-active
    #[serde(default)]
    pub activity_level: Option<String>,
    /// Free-text dietary restrictions
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    /// Application settings
    #[serde(default)]
    pub settings: UserSettings,
    /// Creation time
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// New profile seeded from identity claims
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email,
            photo_url: None,
            age: None,
            weight: None,
            height: None,
            fitness_goals: None,
            activity_level: None,
            dietary_restrictions: None,
            settings: UserSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        if let Some(display_name) = update.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(photo_url) = update.photo_url {
            self.photo_url = Some(photo_url);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(goals) = update.fitness_goals {
            self.fitness_goals = Some(goals);
        }
        if let Some(level) = update.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(restrictions) = update.dietary_restrictions {
            self.dietary_restrictions = Some(restrictions);
        }
        self.updated_at = now;
    }
}

/// Partial profile update; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Display name
    pub display_name: Option<String>,
    /// Avatar URL
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Height in cm
    pub height: Option<f64>,
    /// Free-text goals
    pub fitness_goals: Option<String>,
    /// Activity level
    pub activity_level: Option<String>,
    /// Dietary restrictions
    pub dietary_restrictions: Option<String>,
}

fn default_macro_preferences() -> String {
    "balanced".to_owned()
}

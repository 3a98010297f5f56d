// ABOUTME: Application-wide constants for document collections and progress tracking
// ABOUTME: Single source of truth for collection names and engine limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Document collection names
pub mod collections {
    /// Per-user aggregate progress, keyed by uid
    pub const USER_STATS: &str = "userStats";
    /// Append-only completion log
    pub const COMPLETIONS: &str = "completions";
    /// Awarded achievements, keyed by `<uid>_<achievementId>`
    pub const ACHIEVEMENTS: &str = "achievements";
    /// Curated and submitted workout plans
    pub const WORKOUT_PLANS: &str = "workoutPlans";
    /// Curated and submitted meal plans
    pub const MEAL_PLANS: &str = "mealPlans";
    /// User profiles, keyed by uid
    pub const USERS: &str = "users";
    /// Private workout plans saved by a user
    pub const USER_WORKOUTS: &str = "userWorkouts";
    /// Private meal plans saved by a user
    pub const USER_MEALS: &str = "userMeals";
}

/// Progress engine tuning
pub mod progress {
    /// Meals per week counted as full adherence (3 meals x 7 days)
    pub const WEEKLY_MEAL_TARGET: u32 = 21;

    /// Number of completion events replayed when the aggregate record is missing
    pub const LEGACY_PROGRESS_LIMIT: usize = 30;
}

/// Catalog filter values
pub mod catalog {
    /// Filter value meaning "do not filter on this field"
    pub const FILTER_ALL: &str = "all";

    /// Catalog entry status field name
    pub const STATUS_FIELD: &str = "status";
}

/// Service identifiers used in logs and error messages
pub mod service_names {
    /// DeepSeek chat completions
    pub const DEEPSEEK: &str = "DeepSeek";
    /// Firebase Authentication
    pub const FIREBASE: &str = "Firebase";
}

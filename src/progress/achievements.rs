// ABOUTME: Static achievement definitions and the pure unlock selection
// ABOUTME: Provides the sample achievement list served while the store is unreachable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{EarnedAchievement, UserProgressStats};

/// A badge and the condition that unlocks it
#[derive(Debug, Clone, Copy)]
pub struct AchievementDefinition {
    /// Stable identifier, part of the award document id
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// What the user has to do
    pub description: &'static str,
    /// Emoji badge
    pub icon: &'static str,
    /// Unlock predicate over the user's current stats
    pub condition: fn(&UserProgressStats) -> bool,
}

impl AchievementDefinition {
    /// Whether `stats` satisfy this definition
    #[must_use]
    pub fn is_met(&self, stats: &UserProgressStats) -> bool {
        (self.condition)(stats)
    }

    /// Present this definition as earned at `earned_at`
    #[must_use]
    pub fn earned_at(&self, earned_at: DateTime<Utc>) -> EarnedAchievement {
        EarnedAchievement {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            icon: self.icon.to_owned(),
            earned_at,
        }
    }
}

const fn first_workout(stats: &UserProgressStats) -> bool {
    stats.total_workouts >= 1
}

const fn first_meal(stats: &UserProgressStats) -> bool {
    stats.total_meals >= 1
}

const fn seven_day_streak(stats: &UserProgressStats) -> bool {
    stats.workout_streak >= 7
}

const fn ten_workouts(stats: &UserProgressStats) -> bool {
    stats.total_workouts >= 10
}

const fn full_meal_adherence(stats: &UserProgressStats) -> bool {
    stats.meal_adherence >= 100
}

const fn thirty_day_streak(stats: &UserProgressStats) -> bool {
    stats.workout_streak >= 30
}

/// All achievements, in evaluation order
pub static ACHIEVEMENTS: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "first-workout",
        title: "First Workout",
        description: "Complete your first workout",
        icon: "🏃",
        condition: first_workout,
    },
    AchievementDefinition {
        id: "healthy-eater",
        title: "Healthy Eater",
        description: "Log your first healthy meal",
        icon: "🥗",
        condition: first_meal,
    },
    AchievementDefinition {
        id: "seven-day-streak",
        title: "7 Day Streak",
        description: "Work out seven days in a row",
        icon: "🔥",
        condition: seven_day_streak,
    },
    AchievementDefinition {
        id: "workout-warrior",
        title: "Workout Warrior",
        description: "Complete 10 workouts",
        icon: "💪",
        condition: ten_workouts,
    },
    AchievementDefinition {
        id: "perfect-week",
        title: "Perfect Week",
        description: "Log every meal of your weekly target",
        icon: "🏆",
        condition: full_meal_adherence,
    },
    AchievementDefinition {
        id: "thirty-day-streak",
        title: "30 Day Streak",
        description: "Work out thirty days in a row",
        icon: "🏅",
        condition: thirty_day_streak,
    },
];

/// Look up a definition by id
#[must_use]
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|definition| definition.id == id)
}

/// Definitions satisfied by `stats` that are not yet in `awarded`
///
/// Keeps definition order. Every satisfied definition is returned, so
/// several achievements unlocked by the same completion arrive together.
#[must_use]
pub fn newly_unlocked<'a>(
    definitions: &'a [AchievementDefinition],
    stats: &UserProgressStats,
    awarded: &HashSet<String>,
) -> Vec<&'a AchievementDefinition> {
    definitions
        .iter()
        .filter(|definition| !awarded.contains(definition.id) && definition.is_met(stats))
        .collect()
}

/// Sample achievements shown when the user's awards cannot be read
#[must_use]
pub fn mock_achievements() -> Vec<EarnedAchievement> {
    // 2025-01-06, 2025-01-08 and 2025-01-13, all 09:00 UTC
    let sample = [
        ("first-workout", 1_736_154_000),
        ("healthy-eater", 1_736_326_800),
        ("seven-day-streak", 1_736_758_800),
    ];
    sample
        .iter()
        .filter_map(|(id, timestamp)| {
            let earned_at = DateTime::from_timestamp(*timestamp, 0)?;
            find(id).map(|definition| definition.earned_at(earned_at))
        })
        .collect()
}

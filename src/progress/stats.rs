// ABOUTME: Pure progress update rule for workout streaks and meal adherence
// ABOUTME: Also rebuilds stats from a completion log for users without an aggregate record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use chrono::{DateTime, Utc};

use crate::constants::progress::WEEKLY_MEAL_TARGET;
use crate::models::{CompletionEvent, CompletionKind, UserProgressStats};

/// Apply one completion at `now` to `stats` and return the updated record
///
/// Days are UTC calendar days. A workout one day after the previous one
/// extends the streak, a second workout on the same day leaves it unchanged,
/// and any other gap (or no previous workout) restarts it at 1.
#[must_use]
pub fn apply_completion(
    stats: &UserProgressStats,
    kind: CompletionKind,
    now: DateTime<Utc>,
) -> UserProgressStats {
    let mut next = stats.clone();
    match kind {
        CompletionKind::Workout => {
            let today = now.date_naive();
            let gap = stats
                .last_workout_date
                .map(|last| today.signed_duration_since(last).num_days());
            next.workout_streak = match gap {
                Some(1) => stats.workout_streak.saturating_add(1),
                Some(0) if stats.workout_streak > 0 => stats.workout_streak,
                _ => 1,
            };
            next.total_workouts = stats.total_workouts.saturating_add(1);
            next.last_workout_date = Some(today);
        }
        CompletionKind::Meal => {
            next.total_meals = stats.total_meals.saturating_add(1);
            next.meal_adherence = meal_adherence(next.total_meals);
        }
    }
    next.updated_at = now;
    next
}

/// Percentage of the weekly meal target reached, capped at 100
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn meal_adherence(total_meals: u32) -> u8 {
    let percent = (f64::from(total_meals) / f64::from(WEEKLY_MEAL_TARGET) * 100.0).round();
    percent.min(100.0) as u8
}

/// Rebuild stats by replaying events in chronological order
///
/// Each event is applied at its own `completed_at`. An empty log yields
/// zeroed stats stamped with `now`.
#[must_use]
pub fn replay(mut events: Vec<CompletionEvent>, now: DateTime<Utc>) -> UserProgressStats {
    events.sort_by_key(|event| event.completed_at);
    events
        .iter()
        .fold(UserProgressStats::empty(now), |stats, event| {
            apply_completion(&stats, event.kind, event.completed_at)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let mut stats = UserProgressStats::empty(at(1, 0));
        for day in 1..=5 {
            stats = apply_completion(&stats, CompletionKind::Workout, at(day, 18));
        }
        assert_eq!(stats.workout_streak, 5);
        assert_eq!(stats.total_workouts, 5);
        assert_eq!(stats.last_workout_date, Some(at(5, 0).date_naive()));
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut stats = UserProgressStats::empty(at(1, 0));
        stats = apply_completion(&stats, CompletionKind::Workout, at(1, 8));
        stats = apply_completion(&stats, CompletionKind::Workout, at(2, 8));
        stats = apply_completion(&stats, CompletionKind::Workout, at(4, 8));
        assert_eq!(stats.workout_streak, 1);
        assert_eq!(stats.total_workouts, 3);
    }

    #[test]
    fn test_same_day_workout_keeps_streak() {
        let mut stats = UserProgressStats::empty(at(1, 0));
        stats = apply_completion(&stats, CompletionKind::Workout, at(1, 7));
        stats = apply_completion(&stats, CompletionKind::Workout, at(2, 7));
        stats = apply_completion(&stats, CompletionKind::Workout, at(2, 19));
        assert_eq!(stats.workout_streak, 2);
        assert_eq!(stats.total_workouts, 3);
    }

    #[test]
    fn test_day_boundary_is_utc_midnight() {
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap();
        let mut stats = apply_completion(
            &UserProgressStats::empty(late),
            CompletionKind::Workout,
            late,
        );
        stats = apply_completion(&stats, CompletionKind::Workout, late + Duration::minutes(2));
        assert_eq!(stats.workout_streak, 2);
    }

    #[test]
    fn test_meal_adherence_rounds_and_caps() {
        assert_eq!(meal_adherence(0), 0);
        assert_eq!(meal_adherence(1), 5);
        assert_eq!(meal_adherence(7), 33);
        assert_eq!(meal_adherence(10), 48);
        assert_eq!(meal_adherence(21), 100);
        assert_eq!(meal_adherence(42), 100);
    }

    #[test]
    fn test_meal_does_not_touch_streak() {
        let mut stats = UserProgressStats::empty(at(1, 0));
        stats = apply_completion(&stats, CompletionKind::Workout, at(1, 7));
        stats = apply_completion(&stats, CompletionKind::Meal, at(3, 7));
        assert_eq!(stats.workout_streak, 1);
        assert_eq!(stats.total_meals, 1);
        assert_eq!(stats.meal_adherence, 5);
        assert_eq!(stats.updated_at, at(3, 7));
    }

    #[test]
    fn test_replay_sorts_events() {
        let event = |day, kind| CompletionEvent {
            user_id: "u1".to_owned(),
            reference_id: "p1".to_owned(),
            completed_at: at(day, 9),
            kind,
        };
        let events = vec![
            event(3, CompletionKind::Workout),
            event(1, CompletionKind::Workout),
            event(2, CompletionKind::Meal),
            event(2, CompletionKind::Workout),
        ];
        let stats = replay(events, at(10, 0));
        assert_eq!(stats.workout_streak, 3);
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_meals, 1);
        assert_eq!(stats.updated_at, at(3, 9));
    }

    #[test]
    fn test_replay_empty_log() {
        let stats = replay(Vec::new(), at(10, 0));
        assert_eq!(stats, UserProgressStats::empty(at(10, 0)));
    }
}

// ABOUTME: Progress engine recording completions, updating stats, and awarding achievements
// ABOUTME: Degrades to locally computed stats when the document store misbehaves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::achievements::{self, ACHIEVEMENTS};
use super::repository::ProgressRepository;
use super::stats::{apply_completion, replay};
use crate::clock::Clock;
use crate::constants::collections::{ACHIEVEMENTS as ACHIEVEMENTS_COLLECTION, COMPLETIONS, USER_STATS};
use crate::constants::progress::LEGACY_PROGRESS_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    AwardedAchievement, CompletionEvent, CompletionKind, EarnedAchievement, UserProgressStats,
};
use crate::store::{DocumentStore, OrFallback};

/// Result of recording a completion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    /// Stats after the completion was applied
    pub stats: UserProgressStats,
    /// Achievements unlocked by this completion
    pub newly_awarded: Vec<AwardedAchievement>,
    /// True when part of the write path failed and `stats` were computed locally
    pub degraded: bool,
}

/// Streaks, adherence and achievements for every user
#[derive(Clone)]
pub struct ProgressEngine {
    repository: ProgressRepository,
    clock: Arc<dyn Clock>,
}

impl ProgressEngine {
    /// Create an engine over `store`, reading time from `clock`
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: ProgressRepository::new(store),
            clock,
        }
    }

    /// Record a workout or meal completion
    ///
    /// Store failures do not fail the call: they are logged, the returned
    /// stats are computed locally, and `degraded` is set. A user without a
    /// stats record continues from a replay of their recent completion
    /// events. When neither the record nor the events can be read, the
    /// locally computed stats start from zero and are not written back.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `user_id` is blank or `kind` is neither
    /// `workout` nor `meal`.
    #[instrument(skip(self), fields(user.id = %user_id))]
    pub async fn record_completion(
        &self,
        user_id: &str,
        reference_id: &str,
        kind: &str,
    ) -> AppResult<CompletionOutcome> {
        require_user_id(user_id)?;
        let kind: CompletionKind = kind.parse()?;
        let now = self.clock.now();
        let mut degraded = false;

        // Loaded before the new event is appended so a legacy replay does not count it
        let (previous, writable) = match self.repository.load_stats(user_id).await {
            Ok(Some(stats)) => (stats, true),
            Ok(None) => match self
                .repository
                .recent_events(user_id, LEGACY_PROGRESS_LIMIT)
                .await
            {
                Ok(events) => (replay(events, now), true),
                Err(error) => {
                    AppLogger::log_degraded_fallback("record_completion", COMPLETIONS, &error);
                    degraded = true;
                    (UserProgressStats::empty(now), false)
                }
            },
            Err(error) => {
                AppLogger::log_degraded_fallback("record_completion", USER_STATS, &error);
                degraded = true;
                (UserProgressStats::empty(now), false)
            }
        };

        let event = CompletionEvent {
            user_id: user_id.to_owned(),
            reference_id: reference_id.to_owned(),
            completed_at: now,
            kind,
        };
        if let Err(error) = self.repository.append_event(&event).await {
            AppLogger::log_degraded_fallback("record_completion", COMPLETIONS, &error);
            degraded = true;
        }

        let stats = apply_completion(&previous, kind, now);

        if writable {
            if let Err(error) = self.repository.save_stats(user_id, &stats).await {
                AppLogger::log_degraded_fallback("record_completion", USER_STATS, &error);
                degraded = true;
            }
        }

        let newly_awarded = self.evaluate_achievements(user_id, &stats).await;
        AppLogger::log_completion(user_id, kind.as_str(), stats.workout_streak, degraded);

        Ok(CompletionOutcome {
            stats,
            newly_awarded,
            degraded,
        })
    }

    /// Award every achievement `stats` satisfy that the user does not hold yet
    ///
    /// Returns the awards that were persisted. If the existing awards cannot
    /// be read nothing is awarded, so an achievement is never granted twice.
    pub async fn evaluate_achievements(
        &self,
        user_id: &str,
        stats: &UserProgressStats,
    ) -> Vec<AwardedAchievement> {
        let awarded = match self.repository.awarded_ids(user_id).await {
            Ok(ids) => ids,
            Err(error) => {
                AppLogger::log_degraded_fallback(
                    "evaluate_achievements",
                    ACHIEVEMENTS_COLLECTION,
                    &error,
                );
                return Vec::new();
            }
        };

        let now = self.clock.now();
        let mut persisted = Vec::new();
        for definition in achievements::newly_unlocked(ACHIEVEMENTS, stats, &awarded) {
            let award = AwardedAchievement {
                achievement_id: definition.id.to_owned(),
                user_id: user_id.to_owned(),
                earned_at: now,
            };
            match self.repository.save_award(&award).await {
                Ok(()) => {
                    debug!(achievement = definition.id, "Achievement awarded");
                    persisted.push(award);
                }
                Err(error) => {
                    warn!(achievement = definition.id, error = %error, "Failed to persist achievement");
                }
            }
        }
        persisted
    }

    /// Current stats for the user
    ///
    /// Falls back to replaying the most recent completion events when the
    /// aggregate record is missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank `user_id` and `ResourceUnavailable`
    /// when neither the stats record nor the event log can be read.
    #[instrument(skip(self), fields(user.id = %user_id))]
    pub async fn get_progress(&self, user_id: &str) -> AppResult<UserProgressStats> {
        require_user_id(user_id)?;

        match self.repository.load_stats(user_id).await {
            Ok(Some(stats)) => return Ok(stats),
            Ok(None) => debug!("No stats record, deriving progress from completions"),
            Err(error) => {
                warn!(error = %error, "Stats read failed, deriving progress from completions");
            }
        }

        let events = self
            .repository
            .recent_events(user_id, LEGACY_PROGRESS_LIMIT)
            .await
            .map_err(|error| {
                AppError::unavailable("Progress data is temporarily unavailable. Please retry.")
                    .with_source(error)
            })?;

        Ok(replay(events, self.clock.now()))
    }

    /// Achievements the user has earned, in definition order
    ///
    /// Serves a fixed sample list if the awards cannot be read.
    pub async fn get_achievements(&self, user_id: &str) -> Vec<EarnedAchievement> {
        self.repository
            .awards(user_id)
            .await
            .map(|awards| join_definitions(&awards))
            .or_fallback(
                "get_achievements",
                ACHIEVEMENTS_COLLECTION,
                achievements::mock_achievements,
            )
    }

    /// Delete the user's stats, completion events and awards
    ///
    /// # Errors
    ///
    /// Propagates the first store failure.
    pub async fn delete_user_progress(&self, user_id: &str) -> AppResult<()> {
        require_user_id(user_id)?;
        self.repository.delete_all(user_id).await?;
        Ok(())
    }
}

fn join_definitions(awards: &[AwardedAchievement]) -> Vec<EarnedAchievement> {
    ACHIEVEMENTS
        .iter()
        .filter_map(|definition| {
            awards
                .iter()
                .find(|award| award.achievement_id == definition.id)
                .map(|award| definition.earned_at(award.earned_at))
        })
        .collect()
}

fn require_user_id(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::invalid_input("User ID is required"));
    }
    Ok(())
}

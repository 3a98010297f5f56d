// ABOUTME: User profile and settings management, plus account deletion
// ABOUTME: Profiles are created lazily from verified token claims on first access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use std::sync::Arc;

use serde_json::{json, to_value};
use tracing::{info, instrument};

use super::plans::PlanLibrary;
use crate::auth::AuthenticatedUser;
use crate::clock::Clock;
use crate::constants::collections::USERS;
use crate::errors::{AppError, AppResult};
use crate::models::{ProfileUpdate, UserProfile, UserSettings};
use crate::progress::ProgressEngine;
use crate::store::{DocumentStore, StoreError};

/// Profiles, settings and account lifecycle
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    plans: PlanLibrary,
    progress: ProgressEngine,
}

impl ProfileService {
    /// Create the service; `plans` and `progress` are used for account deletion
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        plans: PlanLibrary,
        progress: ProgressEngine,
    ) -> Self {
        Self {
            store,
            clock,
            plans,
            progress,
        }
    }

    /// The user's profile, created from the token claims if it does not exist yet
    ///
    /// # Errors
    ///
    /// Propagates store failures
    #[instrument(skip(self, user), fields(user.id = %user.uid))]
    pub async fn get_or_create(&self, user: &AuthenticatedUser) -> AppResult<UserProfile> {
        match self.store.get(USERS, &user.uid).await {
            Ok(body) => Ok(serde_json::from_value(body)?),
            Err(StoreError::NotFound { .. }) => {
                let profile = UserProfile::new(&user.uid, user.email.clone(), self.clock.now());
                self.store
                    .set(USERS, &user.uid, to_value(&profile)?)
                    .await?;
                info!("Created user profile");
                Ok(profile)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial profile update
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for out-of-range body metrics and propagates store failures
    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        update: ProfileUpdate,
    ) -> AppResult<UserProfile> {
        validate_update(&update)?;
        let mut profile = self.get_or_create(user).await?;
        profile.apply(update, self.clock.now());
        self.store
            .set(USERS, &user.uid, to_value(&profile)?)
            .await?;
        Ok(profile)
    }

    /// The user's settings
    ///
    /// # Errors
    ///
    /// Propagates store failures
    pub async fn get_settings(&self, user: &AuthenticatedUser) -> AppResult<UserSettings> {
        Ok(self.get_or_create(user).await?.settings)
    }

    /// Replace the user's settings
    ///
    /// # Errors
    ///
    /// Propagates store failures
    pub async fn update_settings(
        &self,
        user: &AuthenticatedUser,
        settings: UserSettings,
    ) -> AppResult<UserSettings> {
        self.get_or_create(user).await?;
        self.store
            .update(
                USERS,
                &user.uid,
                json!({
                    "settings": to_value(&settings)?,
                    "updatedAt": to_value(self.clock.now())?,
                }),
            )
            .await?;
        Ok(settings)
    }

    /// Delete the account's data after the user retyped their email
    ///
    /// Removes saved plans, progress data and finally the profile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `confirmation_email` does not match the
    /// account email, and propagates store failures
    #[instrument(skip(self, user, confirmation_email), fields(user.id = %user.uid))]
    pub async fn delete_account(
        &self,
        user: &AuthenticatedUser,
        confirmation_email: &str,
    ) -> AppResult<()> {
        let account_email = match &user.email {
            Some(email) => Some(email.clone()),
            None => self.stored_email(&user.uid).await?,
        };
        let Some(account_email) = account_email else {
            return Err(AppError::invalid_input(
                "Account has no email address to confirm deletion with",
            ));
        };
        if confirmation_email.trim() != account_email {
            return Err(AppError::invalid_input(
                "Confirmation email does not match the account email",
            ));
        }

        let removed_plans = self.plans.delete_all(&user.uid).await?;
        self.progress.delete_user_progress(&user.uid).await?;
        self.store.delete(USERS, &user.uid).await?;
        info!(removed_plans, "Account deleted");
        Ok(())
    }

    async fn stored_email(&self, uid: &str) -> AppResult<Option<String>> {
        match self.store.get(USERS, uid).await {
            Ok(body) => Ok(serde_json::from_value::<UserProfile>(body)?.email),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_update(update: &ProfileUpdate) -> AppResult<()> {
    if update.age.is_some_and(|age| age == 0 || age > 120) {
        return Err(AppError::invalid_input("age must be between 1 and 120"));
    }
    if update.weight.is_some_and(|w| !(w > 0.0 && w < 700.0)) {
        return Err(AppError::invalid_input("weight must be a positive number of kg"));
    }
    if update.height.is_some_and(|h| !(h > 0.0 && h < 300.0)) {
        return Err(AppError::invalid_input("height must be a positive number of cm"));
    }
    Ok(())
}

// ABOUTME: Degraded-read combinator for store results
// ABOUTME: Substitutes a fallback value for a failed store call and logs the cause
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::StoreResult;
use crate::logging::AppLogger;

/// Resolve a store result to a value, substituting `fallback` on failure
///
/// Used by the read paths that must keep answering during a store outage
/// (achievement listing, catalog listing). The failure is logged at `warn`.
pub trait OrFallback<T> {
    /// Return the stored value, or `fallback()` if the store call failed
    fn or_fallback<F>(self, operation: &str, collection: &str, fallback: F) -> T
    where
        F: FnOnce() -> T;
}

impl<T> OrFallback<T> for StoreResult<T> {
    fn or_fallback<F>(self, operation: &str, collection: &str, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.unwrap_or_else(|error| {
            AppLogger::log_degraded_fallback(operation, collection, &error);
            fallback()
        })
    }
}

// ABOUTME: Progress and achievement tracking for workouts and meals
// ABOUTME: Pure update rules, static achievement catalog, and the store-backed engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Progress & Achievements
//!
//! [`ProgressEngine`] is the entry point. The rules it applies live in
//! [`stats`] and [`achievements`] as pure functions so they can be tested
//! without a store.

/// Achievement definitions and unlock selection
pub mod achievements;
mod engine;
mod repository;
/// Streak and adherence update rule
pub mod stats;

pub use engine::{CompletionOutcome, ProgressEngine};

// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Profiles, saved plans, and LLM-backed generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, decode the request and call
//! into one of these services.

/// LLM-backed plan and advice generation
pub mod generation;

/// Saved workout and meal plans
pub mod plans;

/// Profiles, settings and account deletion
pub mod profile;

pub use generation::PlanGenerator;
pub use plans::{NewPlan, PlanLibrary, PlanPatch};
pub use profile::ProfileService;

// ABOUTME: Core types and constants for the FitPlan fitness and nutrition service
// ABOUTME: Foundation crate with error handling, document models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Core
//!
//! Foundation crate providing shared types for the FitPlan server. It has no
//! I/O of its own; the server crate owns storage, HTTP and the LLM client.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Collection names and progress-tracking constants
//! - **models**: Progress, plan and user profile documents

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Collection names and engine constants
pub mod constants;

/// Document models persisted in the store
pub mod models;

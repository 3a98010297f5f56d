// ABOUTME: HTTP middleware for authentication and cross-origin access
// ABOUTME: Bearer token gate and CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Bearer token authentication
pub mod auth;
/// CORS layer construction
pub mod cors;

pub use auth::AuthMiddleware;
pub use cors::setup_cors;

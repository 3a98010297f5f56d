// ABOUTME: Configuration module root
// ABOUTME: Environment-only configuration for the HTTP server and its collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Configuration is read from environment variables only; command line flags
//! in the server binary override individual values.

/// Server, store, auth and LLM configuration from environment variables
pub mod environment;

pub use environment::{
    CorsConfig, DeepSeekConfig, Environment, FirebaseConfig, ServerConfig, StoreConfig,
};

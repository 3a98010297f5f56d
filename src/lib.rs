// ABOUTME: Main library entry point for the FitPlan API server
// ABOUTME: Wires together storage, authentication, progress tracking, plan catalog and generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Server
//!
//! HTTP backend for a fitness and nutrition planning app. Authenticated users
//! keep a profile, save workout and meal plans, generate personalized plans
//! through an LLM, log completed sessions and earn achievements.
//!
//! ## Architecture
//!
//! - **Store**: document-oriented persistence behind the [`store::DocumentStore`]
//!   trait, with in-memory and `SQLite` backends
//! - **Progress**: event log, streak statistics and achievement evaluation that
//!   keep working in a degraded mode when the store misbehaves
//! - **Catalog**: curated and community plans with a mock fallback
//! - **Routes**: axum routers, one struct per API area
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitplan_server::clock::SystemClock;
//! use fitplan_server::config::ServerConfig;
//! use fitplan_server::store::memory::InMemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let store = Arc::new(InMemoryStore::new());
//! let clock = Arc::new(SystemClock);
//! # let _ = (config, store, clock);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use fitplan_core::{constants, errors, models};

/// Firebase ID token verification
pub mod auth;

/// Curated and community plan catalog
pub mod catalog;

/// Injectable time source
pub mod clock;

/// Environment-based configuration
pub mod config;

/// LLM provider abstraction and the `DeepSeek` client
pub mod llm;

/// Structured logging setup and operation logging helpers
pub mod logging;

/// Request authentication and CORS layers
pub mod middleware;

/// Completion events, statistics and achievements
pub mod progress;

/// Shared server state handed to every router
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and the serve loop
pub mod server;

/// Profile, saved plan and generation services
pub mod services;

/// Document store abstraction and backends
pub mod store;

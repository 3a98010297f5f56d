// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Serialized because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use fitplan_server::config::{Environment, ServerConfig};
use fitplan_server::store::factory::StoreUrl;
use serial_test::serial;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "ENVIRONMENT",
    "FITPLAN_STORE_URL",
    "CORS_ALLOWED_ORIGINS",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_ENABLED",
    "DEEPSEEK_API_KEY",
    "DEEPSEEK_BASE_URL",
    "DEEPSEEK_MODEL",
    "DEEPSEEK_CONNECT_TIMEOUT_SECS",
    "DEEPSEEK_REQUEST_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.store.url, "sqlite:./data/fitplan.db");
    assert!(config.cors.allows_any_origin());
    assert!(!config.firebase.is_configured());
    assert!(!config.deepseek.is_configured());
    assert_eq!(config.deepseek.model, "deepseek-chat");
}

#[test]
#[serial]
fn test_values_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("FITPLAN_STORE_URL", "memory://");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://fitplan.app, http://localhost:5173");
    env::set_var("FIREBASE_PROJECT_ID", "fitplan-test");
    env::set_var("DEEPSEEK_API_KEY", "sk-live");
    env::set_var("DEEPSEEK_REQUEST_TIMEOUT_SECS", "60");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9090);
    assert!(config.environment.is_production());
    assert_eq!(StoreUrl::parse(&config.store.url).unwrap(), StoreUrl::Memory);
    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://fitplan.app", "http://localhost:5173"]
    );
    assert!(config.firebase.is_configured());
    assert_eq!(config.firebase.project_id.as_deref(), Some("fitplan-test"));
    assert!(config.deepseek.is_configured());
    assert_eq!(config.deepseek.request_timeout_secs, 60);
}

#[test]
#[serial]
fn test_blank_secrets_count_as_missing() {
    clear_env();
    env::set_var("FIREBASE_PROJECT_ID", "   ");
    env::set_var("DEEPSEEK_API_KEY", "");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(!config.firebase.is_configured());
    assert!(config.deepseek.api_key.is_none());
}

#[test]
#[serial]
fn test_firebase_can_be_switched_off() {
    clear_env();
    env::set_var("FIREBASE_PROJECT_ID", "fitplan-test");
    env::set_var("FIREBASE_ENABLED", "false");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(!config.firebase.is_configured());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("HTTP_PORT", "0");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("HTTP_PORT", "8081");
    env::set_var("DEEPSEEK_CONNECT_TIMEOUT_SECS", "soon");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_summary_hides_secrets() {
    clear_env();
    env::set_var("DEEPSEEK_API_KEY", "sk-very-secret");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    let summary = config.summary();
    assert!(!summary.contains("sk-very-secret"));
    assert!(summary.contains("Plan Generation: Enabled"));
}

// ABOUTME: Catalog seeding utility for the FitPlan server
// ABOUTME: Writes the bundled curated workout and meal plans into the document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Curated catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed the store named by FITPLAN_STORE_URL
//! cargo run --bin seed-catalog
//!
//! # Override the store URL
//! cargo run --bin seed-catalog -- --store-url sqlite:./data/fitplan.db
//!
//! # Overwrite entries that already exist
//! cargo run --bin seed-catalog -- --force
//! ```

use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use fitplan_server::{
    catalog::mock::{curated_meals, curated_workouts},
    config::environment::DEFAULT_STORE_URL,
    constants::collections::{MEAL_PLANS, WORKOUT_PLANS},
    logging::LoggingConfig,
    store::{factory::create_store, DocumentStore},
};
use serde::Serialize;
use serde_json::to_value;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "FitPlan catalog seeder",
    long_about = "Write the curated workout and meal plans into the document store"
)]
struct SeedArgs {
    /// Store URL override
    #[arg(long)]
    store_url: Option<String>,

    /// Overwrite entries that already exist
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Default)]
struct SeedCounts {
    written: usize,
    skipped: usize,
}

async fn seed_collection<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    entries: Vec<(String, T)>,
    force: bool,
) -> Result<SeedCounts> {
    let mut counts = SeedCounts::default();
    for (id, entry) in entries {
        if !force && store.get(collection, &id).await.is_ok() {
            counts.skipped += 1;
            continue;
        }
        store
            .set(collection, &id, to_value(&entry)?)
            .await
            .with_context(|| format!("Failed to write {collection}/{id}"))?;
        counts.written += 1;
    }
    Ok(counts)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    LoggingConfig::from_env().init()?;

    let url = args
        .store_url
        .or_else(|| env::var("FITPLAN_STORE_URL").ok())
        .unwrap_or_else(|| DEFAULT_STORE_URL.to_owned());

    let store = create_store(&url)
        .await
        .with_context(|| format!("Failed to open document store at {url}"))?;

    let workouts = curated_workouts()
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();
    let meals = curated_meals()
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();

    let workout_counts = seed_collection(store.as_ref(), WORKOUT_PLANS, workouts, args.force).await?;
    let meal_counts = seed_collection(store.as_ref(), MEAL_PLANS, meals, args.force).await?;

    info!(
        written = workout_counts.written,
        skipped = workout_counts.skipped,
        "Seeded workout plans"
    );
    info!(
        written = meal_counts.written,
        skipped = meal_counts.skipped,
        "Seeded meal plans"
    );

    Ok(())
}

// ABOUTME: Fixed-precision RFC 3339 serde format for stored timestamps
// ABOUTME: Keeps lexicographic order of stored strings equal to chronological order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Serialize `DateTime<Utc>` with exactly nine fraction digits and a `Z`
//! suffix. Store backends order documents by comparing field values as
//! strings, which only matches time order when every value has the same
//! width. Deserialization accepts any RFC 3339 string.
//!
//! Use on a field with `#[serde(with = "...::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format `value` as `YYYY-MM-DDTHH:MM:SS.nnnnnnnnnZ`
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Serde serializer half
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Serde deserializer half
///
/// # Errors
///
/// Fails when the value is not an RFC 3339 timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer)
}

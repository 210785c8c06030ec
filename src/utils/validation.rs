// ABOUTME: Validation helpers for tool input parameters
// ABOUTME: Checks athlete ID shape and YYYY-MM-DD date strings before API calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Input parameter validation
//!
//! These helpers reject malformed identifiers and dates before they reach
//! the upstream API, with descriptive errors an operator can act on.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::{AppError, AppResult};

fn athlete_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^i?\d+$").ok())
        .as_ref()
}

/// Validate that an athlete ID is in the correct format.
///
/// Empty strings are allowed (meaning no default athlete ID is set).
/// Non-empty athlete IDs must be all digits or start with `i` followed
/// by digits.
///
/// # Errors
///
/// Returns [`AppError`] if the athlete ID is not in the correct format.
pub fn validate_athlete_id(athlete_id: &str) -> AppResult<()> {
    if athlete_id.is_empty() {
        return Ok(());
    }
    let Some(pattern) = athlete_id_pattern() else {
        return Err(AppError::internal("athlete ID pattern failed to compile"));
    };
    if pattern.is_match(athlete_id) {
        Ok(())
    } else {
        Err(AppError::invalid_input(
            "ATHLETE_ID must be all digits (e.g. 123456) or start with 'i' followed by digits (e.g. i123456)",
        ))
    }
}

/// Validate that a date string is in `YYYY-MM-DD` format.
///
/// Returns the validated date string so callers can pass it straight through.
///
/// # Errors
///
/// Returns [`AppError`] if the date string is not in `YYYY-MM-DD` format.
pub fn validate_date(date_str: &str) -> AppResult<&str> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| {
            AppError::invalid_format("Invalid date format. Please use YYYY-MM-DD.").with_source(e)
        })
        .map(|_| date_str)
}

// ABOUTME: Upstream API client implementations
// ABOUTME: Hosts the Intervals.icu REST client behind the IntervalsApi trait seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Upstream API clients

/// Intervals.icu REST API client
pub mod intervals;

pub use intervals::{IntervalsApi, IntervalsClient};

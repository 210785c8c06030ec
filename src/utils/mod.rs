// ABOUTME: Utility functions and helpers shared across modules
// ABOUTME: Currently hosts input parameter validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! Utility functions and helpers

/// Input parameter validation (athlete IDs, dates)
pub mod validation;

// ABOUTME: Tool registration facade and host-runtime binding layer
// ABOUTME: Collects named async tool handlers and wires them into a host at run time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Intervals MCP Server contributors

//! # Tool Registry and Host Binding
//!
//! Tools are registered against a small facade ([`registry::ToolRegistry`])
//! without committing to any particular host runtime at definition time. At
//! run time the registry binds the collected handlers into the first host
//! candidate that accepts them, trying a fixed priority order of binding
//! conventions ([`binding::BindingStrategy`]), and falls back to the built-in
//! stdio server when every candidate fails.

/// Host runtime probing and binding strategies
pub mod binding;
/// Intervals.icu tool implementations and registration wiring
pub mod implementations;
/// Tool collection and the bind/run sequence
pub mod registry;

pub use binding::{BindError, BindingStrategy, HostRuntime, HostServer, BINDING_PRIORITY};
pub use registry::{LifecycleHook, ShimError, ToolEntry, ToolFuture, ToolHandler, ToolRegistry};

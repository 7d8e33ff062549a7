// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for Tagkeeper.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// REST API version prefix on every catalog path
pub const API_VERSION: &str = "v1";

/// Path suffix for the tag collection under an entry
pub const TAGS_SUFFIX: &str = "tags";

/// Path for resolving an entry by its linked resource
pub const LOOKUP_PATH: &str = "entries:lookup";

/// Query parameter naming the linked resource on a lookup call
pub const LOOKUP_QUERY_PARAM: &str = "linkedResource";

// ============================================================================
// Environment Variables
// ============================================================================

/// Environment variable naming the catalog endpoint (e.g. `https://catalog.example.com`)
pub const ENV_ENDPOINT: &str = "TAGKEEPER_ENDPOINT";

/// Environment variable carrying the bearer token for catalog authentication
pub const ENV_AUTH_TOKEN: &str = "TAGKEEPER_AUTH_TOKEN";

// ============================================================================
// HTTP Transport Tuning
// ============================================================================

/// Per-request timeout for catalog HTTP calls (seconds)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP retry initial interval (50ms)
pub const HTTP_INITIAL_INTERVAL_MILLIS: u64 = 50;

/// HTTP retry maximum interval (10 seconds)
pub const HTTP_MAX_INTERVAL_SECS: u64 = 10;

/// HTTP retry maximum elapsed time (2 minutes)
pub const HTTP_MAX_ELAPSED_TIME_SECS: u64 = 120;

/// Backoff multiplier (exponential growth factor)
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Randomization factor to prevent thundering herd (±10%)
pub const RANDOMIZATION_FACTOR: f64 = 0.1;

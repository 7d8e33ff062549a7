// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Retry logic with exponential backoff for catalog HTTP calls.
//!
//! This module provides utilities for retrying transient transport errors
//! (connectivity failures, timeouts, HTTP 429/5xx) with exponential backoff,
//! while failing fast on permanent errors (not-found, permission-denied,
//! invalid payloads).
//!
//! Retry lives entirely inside the transport client. The reconciliation facade
//! never retries; it sees either the final success or the final error.

use crate::catalog_errors::CatalogError;
use crate::constants::{
    BACKOFF_MULTIPLIER, HTTP_INITIAL_INTERVAL_MILLIS, HTTP_MAX_ELAPSED_TIME_SECS,
    HTTP_MAX_INTERVAL_SECS, RANDOMIZATION_FACTOR,
};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Simple exponential backoff implementation.
///
/// Provides exponential backoff with randomization (jitter) to prevent thundering herd.
pub struct ExponentialBackoff {
    /// Current interval duration
    pub current_interval: Duration,
    /// Maximum interval duration
    pub max_interval: Duration,
    /// Maximum total elapsed time
    pub max_elapsed_time: Option<Duration>,
    /// Backoff multiplier (typically 2.0 for doubling)
    pub multiplier: f64,
    /// Randomization factor (e.g., 0.1 for ±10%)
    pub randomization_factor: f64,
    /// Start time for tracking total elapsed time
    start_time: Instant,
}

impl ExponentialBackoff {
    /// Create a new exponential backoff with specified parameters.
    fn new(
        initial_interval: Duration,
        max_interval: Duration,
        max_elapsed_time: Option<Duration>,
        multiplier: f64,
        randomization_factor: f64,
    ) -> Self {
        Self {
            current_interval: initial_interval,
            max_interval,
            max_elapsed_time,
            multiplier,
            randomization_factor,
            start_time: Instant::now(),
        }
    }

    /// Get the next backoff interval, or None if max elapsed time exceeded.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        // Check if we've exceeded max elapsed time
        if let Some(max_elapsed) = self.max_elapsed_time {
            if self.start_time.elapsed() >= max_elapsed {
                return None;
            }
        }

        // Get current interval with jitter
        let interval = self.current_interval;
        let jittered = self.apply_jitter(interval);

        // Calculate next interval (exponential growth)
        let next = interval.as_secs_f64() * self.multiplier;
        self.current_interval = Duration::from_secs_f64(next).min(self.max_interval);

        Some(jittered)
    }

    /// Apply randomization (jitter) to an interval.
    fn apply_jitter(&self, interval: Duration) -> Duration {
        if self.randomization_factor == 0.0 {
            return interval;
        }

        let secs = interval.as_secs_f64();
        let delta = secs * self.randomization_factor;
        let min = secs - delta;
        let max = secs + delta;

        let mut rng = rand::thread_rng();
        let jittered = rng.gen_range(min..=max);

        Duration::from_secs_f64(jittered.max(0.0))
    }
}

/// Create exponential backoff configuration for catalog HTTP retries.
///
/// # Configuration
///
/// - **Initial interval**: 50ms
/// - **Max interval**: 10 seconds
/// - **Max elapsed time**: 2 minutes total
/// - **Multiplier**: 2.0 (exponential growth)
/// - **Randomization**: ±10% (prevents thundering herd)
///
/// # Retry Schedule
///
/// With these settings, retries occur at approximately:
///
/// 1. 50ms
/// 2. 100ms
/// 3. 200ms
/// 4. 400ms
/// 5. 800ms
/// 6. 1.6s
/// 7. 3.2s
/// 8. 6.4s
/// 9. 10s (capped at max interval)
///    10-12. 10s intervals until 2 minutes elapsed
///
/// # Returns
///
/// Configured `ExponentialBackoff` instance
#[must_use]
pub fn http_backoff() -> ExponentialBackoff {
    ExponentialBackoff::new(
        Duration::from_millis(HTTP_INITIAL_INTERVAL_MILLIS),
        Duration::from_secs(HTTP_MAX_INTERVAL_SECS),
        Some(Duration::from_secs(HTTP_MAX_ELAPSED_TIME_SECS)),
        BACKOFF_MULTIPLIER,
        RANDOMIZATION_FACTOR,
    )
}

/// Retry a catalog HTTP call with exponential backoff.
///
/// Automatically retries on transient errors (per [`CatalogError::is_transient`])
/// and fails immediately on permanent errors.
///
/// # Arguments
///
/// * `operation` - Async function that performs the HTTP call
/// * `operation_name` - Human-readable name for logging (e.g., "list tags")
///
/// # Returns
///
/// Result of the call after retries
///
/// # Errors
///
/// Returns error if:
/// - A non-transient error is encountered (fails immediately, error unmodified)
/// - Max elapsed time exceeded (the last transient error is returned)
pub async fn retry_http_call<T, F, Fut>(
    mut operation: F,
    operation_name: &str,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, CatalogError>>,
{
    let mut backoff = http_backoff();
    let start_time = Instant::now();
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(
                        operation = operation_name,
                        attempt = attempt,
                        elapsed = ?start_time.elapsed(),
                        "Catalog HTTP call succeeded after retries"
                    );
                }
                return Ok(value);
            }
            Err(e) => {
                if !e.is_transient() {
                    error!(
                        operation = operation_name,
                        error = %e,
                        reason = e.reason(),
                        "Non-retryable catalog error, failing immediately"
                    );
                    return Err(e);
                }

                let Some(delay) = backoff.next_backoff() else {
                    error!(
                        operation = operation_name,
                        attempt = attempt,
                        elapsed = ?start_time.elapsed(),
                        error = %e,
                        "Max retry time exceeded, giving up"
                    );
                    return Err(e);
                };

                warn!(
                    operation = operation_name,
                    attempt = attempt,
                    delay = ?delay,
                    error = %e,
                    "Transient catalog error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

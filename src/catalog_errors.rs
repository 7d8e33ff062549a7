// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Catalog operation error types for Tagkeeper.
//!
//! This module provides the error taxonomy for operations against the remote
//! data catalog:
//! - Lookup failures (entry, template, or tag not found)
//! - Authorization failures
//! - Transport failures (connectivity, timeouts, service unavailability)
//! - Payload problems (invalid tag data, serialization failures)
//!
//! The reconciliation facade performs no translation or suppression of its own:
//! whatever the catalog client returns propagates to the caller unmodified.

use thiserror::Error;

/// Errors that can occur during operations against the remote data catalog.
///
/// Returned by every [`CatalogClient`](crate::client::CatalogClient) capability
/// and propagated unchanged through the [`CatalogFacade`](crate::facade::CatalogFacade).
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Entry not found in the catalog
    ///
    /// Returned when an operation references an entry name the catalog does not
    /// know. This could happen if the entry was deleted externally or was never
    /// catalogued.
    #[error("Entry '{entry}' not found in catalog")]
    EntryNotFound {
        /// The entry name that was not found
        entry: String,
    },

    /// Tag template not found in the catalog
    ///
    /// Returned when a template identifier does not resolve. This typically
    /// indicates the template was deleted or the identifier is misspelled.
    #[error("Tag template '{template}' not found in catalog")]
    TemplateNotFound {
        /// The template identifier that was not found
        template: String,
    },

    /// Persisted tag not found
    ///
    /// Returned when a write targets a tag name the catalog no longer holds,
    /// e.g. the tag was deleted between the listing read and the write.
    #[error("Tag '{name}' not found in catalog")]
    TagNotFound {
        /// The persisted tag name that was not found
        name: String,
    },

    /// Caller lacks permission on the target resource (HTTP 401/403)
    #[error("Permission denied on '{resource}': {reason}")]
    PermissionDenied {
        /// The resource the operation targeted
        resource: String,
        /// Explanation returned by the catalog
        reason: String,
    },

    /// Tag payload rejected before or by the catalog
    ///
    /// Returned when a tag cannot be submitted as-is: missing template, a
    /// persisted name required for routing but absent, or field data the
    /// catalog refuses.
    #[error("Invalid tag data: {reason}")]
    InvalidTagData {
        /// Explanation of what is invalid
        reason: String,
    },

    /// Catalog service unavailable (HTTP 429, 502, 503, 504)
    ///
    /// Returned when the catalog endpoint answers but cannot serve the request.
    /// These failures are transient and safe to retry at the transport layer.
    #[error("Catalog service at {endpoint} unavailable (HTTP {status_code})")]
    ServiceUnavailable {
        /// The endpoint that was unavailable
        endpoint: String,
        /// HTTP status code (429, 502, 503 or 504)
        status_code: u16,
    },

    /// HTTP connection failed (network unreachable, connection refused)
    #[error("HTTP connection to {endpoint} failed: {reason}")]
    HttpConnectionFailed {
        /// The endpoint that couldn't be reached
        endpoint: String,
        /// Reason for the connection failure
        reason: String,
    },

    /// HTTP request timed out
    #[error("HTTP request to {endpoint} timed out after {timeout_ms}ms")]
    HttpRequestTimeout {
        /// The endpoint that timed out
        endpoint: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Unexpected HTTP response from the catalog API
    ///
    /// Returned when the catalog answers with a status code that doesn't map to
    /// a known error condition.
    #[error("Unexpected HTTP response from {endpoint}: {status_code} {reason}")]
    UnexpectedHttpResponse {
        /// The endpoint that returned the unexpected response
        endpoint: String,
        /// HTTP status code
        status_code: u16,
        /// Response body or error message
        reason: String,
    },

    /// Failed to serialize or deserialize a catalog payload
    #[error("Catalog payload serialization failed: {reason}")]
    Serialization {
        /// Explanation of the serialization failure
        reason: String,
    },
}

impl CatalogError {
    /// Returns true if this error is transient and the operation may be retried.
    ///
    /// Retry happens only inside the transport client; the reconciliation
    /// facade never retries.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            // Transient errors that may be retried
            Self::ServiceUnavailable { .. }
            | Self::HttpConnectionFailed { .. }
            | Self::HttpRequestTimeout { .. } => true,

            // Permanent errors that must not be retried
            Self::EntryNotFound { .. }
            | Self::TemplateNotFound { .. }
            | Self::TagNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidTagData { .. }
            | Self::UnexpectedHttpResponse { .. }
            | Self::Serialization { .. } => false,
        }
    }

    /// Returns a stable reason code for this error.
    ///
    /// Used in structured log fields so operators can filter on failure class
    /// without parsing display strings.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EntryNotFound { .. } => "EntryNotFound",
            Self::TemplateNotFound { .. } => "TemplateNotFound",
            Self::TagNotFound { .. } => "TagNotFound",
            Self::PermissionDenied { .. } => "PermissionDenied",
            Self::InvalidTagData { .. } => "InvalidTagData",
            Self::ServiceUnavailable { .. } => "ServiceUnavailable",
            Self::HttpConnectionFailed { .. } => "HttpConnectionFailed",
            Self::HttpRequestTimeout { .. } => "HttpRequestTimeout",
            Self::UnexpectedHttpResponse { .. } => "UnexpectedHttpResponse",
            Self::Serialization { .. } => "SerializationFailed",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP status code mapping for the catalog REST API.
//!
//! This module converts HTTP status codes returned by the catalog service into
//! [`CatalogError`] variants. Centralizing the mapping keeps the REST client's
//! response handling uniform across all seven capabilities and gives operators
//! consistent error reasons to filter on.
//!
//! # Usage
//!
//! ```rust
//! use tagkeeper::http_errors::{map_http_status, NotFoundKind};
//!
//! let err = map_http_status(404, "https://catalog.example.com", NotFoundKind::Entry("e1".into()));
//! assert_eq!(err.reason(), "EntryNotFound");
//!
//! let err = map_http_status(503, "https://catalog.example.com", NotFoundKind::Entry("e1".into()));
//! assert!(err.is_transient());
//! ```

use crate::catalog_errors::CatalogError;

/// What a 404 from the catalog means for the request that produced it.
///
/// The catalog returns a plain 404 for any missing resource; only the caller
/// knows whether it asked for an entry, a template, or a persisted tag.
#[derive(Clone, Debug)]
pub enum NotFoundKind {
    /// The request targeted an entry with this name
    Entry(String),
    /// The request targeted a tag template with this identifier
    Template(String),
    /// The request targeted a persisted tag with this name
    Tag(String),
}

/// Map an HTTP status code to a [`CatalogError`].
///
/// # Arguments
///
/// * `status_code` - HTTP status code from the catalog response
/// * `endpoint` - The endpoint the request was sent to
/// * `not_found` - How to interpret a 404 for this request
///
/// # HTTP Code Mapping
///
/// | HTTP Code | Error | Meaning |
/// |-----------|-------|---------|
/// | 400 | `InvalidTagData` | Payload rejected by the catalog |
/// | 401, 403 | `PermissionDenied` | Missing or insufficient credentials |
/// | 404 | per `not_found` | Entry, template, or tag missing |
/// | 408 | `HttpRequestTimeout` | Server-side request timeout |
/// | 429, 502, 503, 504 | `ServiceUnavailable` | Transient, retryable |
/// | Other | `UnexpectedHttpResponse` | Unclassified failure |
#[must_use]
pub fn map_http_status(status_code: u16, endpoint: &str, not_found: NotFoundKind) -> CatalogError {
    match status_code {
        400 => CatalogError::InvalidTagData {
            reason: format!("catalog rejected request payload (HTTP 400) at {endpoint}"),
        },
        401 | 403 => CatalogError::PermissionDenied {
            resource: endpoint.to_string(),
            reason: format!("HTTP {status_code}"),
        },
        404 => match not_found {
            NotFoundKind::Entry(entry) => CatalogError::EntryNotFound { entry },
            NotFoundKind::Template(template) => CatalogError::TemplateNotFound { template },
            NotFoundKind::Tag(name) => CatalogError::TagNotFound { name },
        },
        408 => CatalogError::HttpRequestTimeout {
            endpoint: endpoint.to_string(),
            timeout_ms: 0,
        },
        429 | 502 | 503 | 504 => CatalogError::ServiceUnavailable {
            endpoint: endpoint.to_string(),
            status_code,
        },
        _ => CatalogError::UnexpectedHttpResponse {
            endpoint: endpoint.to_string(),
            status_code,
            reason: format!("unexpected HTTP status from catalog ({status_code})"),
        },
    }
}

/// Map a transport-level [`reqwest::Error`] (no HTTP status available) to a
/// [`CatalogError`].
///
/// Use this when the HTTP client fails before receiving a response: connection
/// refused, DNS resolution failure, or a client-side timeout.
#[must_use]
pub fn map_transport_error(err: &reqwest::Error, endpoint: &str, timeout_ms: u64) -> CatalogError {
    if err.is_timeout() {
        CatalogError::HttpRequestTimeout {
            endpoint: endpoint.to_string(),
            timeout_ms,
        }
    } else {
        CatalogError::HttpConnectionFailed {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }
}

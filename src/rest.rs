// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP/JSON implementation of the [`CatalogClient`] contract.
//!
//! [`RestCatalogClient`] talks to the catalog's REST surface:
//!
//! | Capability | Request |
//! |---|---|
//! | `list_tags` | `GET {base}/v1/{entry}/tags` |
//! | `create_tag` | `POST {base}/v1/{entry}/tags` |
//! | `update_tag` | `PATCH {base}/v1/{tag.name}` |
//! | `delete_tag` | `DELETE {base}/v1/{tag_name}` |
//! | `get_entry` | `GET {base}/v1/{entry}` |
//! | `get_tag_template` | `GET {base}/v1/{template}` |
//! | `lookup_entry` | `GET {base}/v1/entries:lookup?linkedResource={resource}` |
//!
//! Resource identifiers are catalog-style paths (`projects/p/entries/e`) and
//! are spliced into the URL as-is. Authentication is an optional bearer token.
//! Transient failures (429, 5xx, connectivity) are retried with exponential
//! backoff via [`retry_http_call`](crate::retry::retry_http_call); permanent
//! failures surface immediately through the [`http_errors`](crate::http_errors)
//! mapping.

use crate::catalog_errors::CatalogError;
use crate::client::CatalogClient;
use crate::constants::{
    API_VERSION, HTTP_REQUEST_TIMEOUT_SECS, LOOKUP_PATH, LOOKUP_QUERY_PARAM, TAGS_SUFFIX,
};
use crate::http_errors::{map_http_status, map_transport_error, NotFoundKind};
use crate::model::{Entry, Tag, TagTemplate};
use crate::retry::retry_http_call;
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Wire shape of the tag listing response.
#[derive(Debug, Deserialize)]
struct ListTagsResponse {
    #[serde(default)]
    tags: Vec<Tag>,
}

/// Catalog client over HTTP/JSON.
///
/// Cheap to clone; the underlying `reqwest::Client` is a shared connection
/// pool.
#[derive(Clone)]
pub struct RestCatalogClient {
    http: HttpClient,
    base: Url,
    token: Option<String>,
}

impl RestCatalogClient {
    /// Build a client for the catalog at `base`, optionally authenticating
    /// with a bearer `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base: Url, token: Option<String>) -> Result<Self, CatalogError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::HttpConnectionFailed {
                endpoint: base.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { http, base, token })
    }

    /// The catalog endpoint this client targets.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    /// Join a catalog resource path onto the versioned API base.
    ///
    /// Resource names contain slashes and a lookup path contains a colon, so
    /// this splices rather than using `Url::join` (which would interpret
    /// segments).
    fn api_url(&self, resource_path: &str) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        format!("{base}/{API_VERSION}/{resource_path}")
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Issue one catalog request and decode the JSON response.
    ///
    /// All capability methods funnel through here so that logging, auth,
    /// status mapping, and body decoding stay uniform.
    async fn request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        not_found: NotFoundKind,
    ) -> Result<T, CatalogError> {
        debug!(
            method = %method,
            url = %url,
            auth_enabled = self.token.is_some(),
            "HTTP API request to catalog"
        );

        let mut request = self.http.request(method.clone(), url);
        if let Some(body_data) = body {
            request = request.json(body_data);
        }

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| map_transport_error(&e, url, HTTP_REQUEST_TIMEOUT_SECS * 1000))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                method = %method,
                url = %url,
                status = %status,
                error = %error_text,
                "HTTP API request failed"
            );
            return Err(map_http_status(status.as_u16(), url, not_found));
        }

        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(&e, url, HTTP_REQUEST_TIMEOUT_SECS * 1000))?;

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = text.len(),
            "HTTP API request successful"
        );

        // DELETE returns an empty body; decode as JSON null equivalent
        if text.is_empty() {
            return serde_json::from_str("null").map_err(Into::into);
        }

        serde_json::from_str(&text).map_err(Into::into)
    }
}

#[async_trait::async_trait]
impl CatalogClient for RestCatalogClient {
    async fn list_tags(&self, entry: &str) -> Result<Vec<Tag>, CatalogError> {
        let url = self.api_url(&format!("{entry}/{TAGS_SUFFIX}"));
        let response: ListTagsResponse = retry_http_call(
            || {
                self.request(
                    Method::GET,
                    &url,
                    None::<&()>,
                    NotFoundKind::Entry(entry.to_string()),
                )
            },
            "list tags",
        )
        .await?;
        Ok(response.tags)
    }

    async fn create_tag(&self, entry: &str, tag: &Tag) -> Result<Tag, CatalogError> {
        let url = self.api_url(&format!("{entry}/{TAGS_SUFFIX}"));
        retry_http_call(
            || {
                self.request(
                    Method::POST,
                    &url,
                    Some(tag),
                    NotFoundKind::Entry(entry.to_string()),
                )
            },
            "create tag",
        )
        .await
    }

    async fn update_tag(&self, tag: &Tag) -> Result<Tag, CatalogError> {
        // Routing needs a persisted name; the facade never guarantees one
        if !tag.is_persisted() {
            return Err(CatalogError::InvalidTagData {
                reason: format!(
                    "cannot update unpersisted tag for template '{}': missing catalog name",
                    tag.template
                ),
            });
        }

        let url = self.api_url(&tag.name);
        retry_http_call(
            || {
                self.request(
                    Method::PATCH,
                    &url,
                    Some(tag),
                    NotFoundKind::Tag(tag.name.clone()),
                )
            },
            "update tag",
        )
        .await
    }

    async fn delete_tag(&self, name: &str) -> Result<(), CatalogError> {
        let url = self.api_url(name);
        retry_http_call(
            || {
                self.request::<(), serde_json::Value>(
                    Method::DELETE,
                    &url,
                    None,
                    NotFoundKind::Tag(name.to_string()),
                )
            },
            "delete tag",
        )
        .await?;
        Ok(())
    }

    async fn get_entry(&self, name: &str) -> Result<Entry, CatalogError> {
        let url = self.api_url(name);
        retry_http_call(
            || {
                self.request(
                    Method::GET,
                    &url,
                    None::<&()>,
                    NotFoundKind::Entry(name.to_string()),
                )
            },
            "get entry",
        )
        .await
    }

    async fn get_tag_template(&self, name: &str) -> Result<TagTemplate, CatalogError> {
        let url = self.api_url(name);
        retry_http_call(
            || {
                self.request(
                    Method::GET,
                    &url,
                    None::<&()>,
                    NotFoundKind::Template(name.to_string()),
                )
            },
            "get tag template",
        )
        .await
    }

    async fn lookup_entry(&self, linked_resource: &str) -> Result<Entry, CatalogError> {
        let mut url = Url::parse(&self.api_url(LOOKUP_PATH)).map_err(|e| {
            CatalogError::HttpConnectionFailed {
                endpoint: self.base.to_string(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair(LOOKUP_QUERY_PARAM, linked_resource);
        let url = url.to_string();

        retry_http_call(
            || {
                self.request(
                    Method::GET,
                    &url,
                    None::<&()>,
                    NotFoundKind::Entry(linked_resource.to_string()),
                )
            },
            "lookup entry",
        )
        .await
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The catalog client contract.
//!
//! [`CatalogClient`] is the only boundary the reconciliation facade depends on.
//! Everything the remote catalog owns - authentication, transport, pagination,
//! retries - lives behind this trait. The production implementation is
//! [`RestCatalogClient`](crate::rest::RestCatalogClient); tests substitute an
//! in-memory double with canned responses and call-count assertions.

use crate::catalog_errors::CatalogError;
use crate::model::{Entry, Tag, TagTemplate};

/// Capability contract against the remote data catalog.
///
/// Each method maps one-to-one onto a catalog API call. Implementations decide
/// how the call travels (HTTP, in-memory, recorded); the facade only cares
/// about the results and propagates every error unmodified.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// List the tags currently attached to an entry.
    ///
    /// The returned order is whatever the catalog produces; the facade's
    /// first-match tie-break depends on it, so implementations must not
    /// reorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or the listing call fails.
    async fn list_tags(&self, entry: &str) -> Result<Vec<Tag>, CatalogError>;

    /// Attach a new tag to an entry.
    ///
    /// Returns the created tag with its catalog-assigned `name` populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist, the payload is invalid,
    /// or the write fails.
    async fn create_tag(&self, entry: &str, tag: &Tag) -> Result<Tag, CatalogError>;

    /// Replace the fields of a persisted tag.
    ///
    /// The tag is passed as the full payload; the catalog resolves which
    /// persisted tag to overwrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be resolved or the write fails.
    async fn update_tag(&self, tag: &Tag) -> Result<Tag, CatalogError>;

    /// Delete a persisted tag by its catalog-assigned name.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag does not exist or the delete fails.
    async fn delete_tag(&self, name: &str) -> Result<(), CatalogError>;

    /// Fetch an entry by its catalog-assigned name.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or the read fails.
    async fn get_entry(&self, name: &str) -> Result<Entry, CatalogError>;

    /// Fetch a tag template by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or the read fails.
    async fn get_tag_template(&self, name: &str) -> Result<TagTemplate, CatalogError>;

    /// Resolve an entry from the external resource it describes.
    ///
    /// # Errors
    ///
    /// Returns an error if no entry is catalogued for the resource or the
    /// lookup fails.
    async fn lookup_entry(&self, linked_resource: &str) -> Result<Entry, CatalogError>;
}

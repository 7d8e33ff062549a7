// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tag reconciliation facade over a [`CatalogClient`].
//!
//! This module provides [`CatalogFacade`], the one place in the crate that
//! makes decisions: given a target entry and a desired tag, it chooses between
//! creating a new tag, updating an existing one, or (for deletion) removing a
//! matching one, by comparing template identifiers against the tags already
//! attached to the entry.
//!
//! # Reconciliation model
//!
//! Every operation is a single-shot read-then-decide-then-write:
//!
//! 1. List the tags currently attached to the entry (one read)
//! 2. Scan for the first tag instantiating the desired template
//! 3. Issue at most one write (create, update, or delete)
//!
//! The facade is stateless - nothing is cached or carried between calls - and
//! it never retries or compensates: a failure from the catalog at either step
//! propagates unmodified to the caller. Concurrent reconcilers racing on the
//! same entry can both observe "not found" and both create; resolving that
//! belongs to the catalog, not to this client-side pattern.
//!
//! # Example
//!
//! ```rust,no_run
//! use tagkeeper::facade::CatalogFacade;
//! use tagkeeper::model::{FieldValue, Tag};
//! use tagkeeper::rest::RestCatalogClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = RestCatalogClient::new("https://catalog.example.com".parse()?, None)?;
//! let facade = CatalogFacade::new(client);
//!
//! let desired = Tag::new("projects/acme/tagTemplates/data_owner")
//!     .with_field("owner", FieldValue::String("data-eng".to_string()));
//!
//! facade.upsert_tag("projects/acme/entries/orders", &desired).await?;
//! # Ok(())
//! # }
//! ```

use crate::catalog_errors::CatalogError;
use crate::client::CatalogClient;
use crate::model::{Entry, Tag, TagTemplate};
use tracing::{debug, info};

/// Stateless reconciler for tags on catalog entries.
///
/// Holds only the client it delegates to. All seven public operations perform
/// at most one read followed by at most one write against the catalog.
pub struct CatalogFacade<C: CatalogClient> {
    client: C,
}

impl<C: CatalogClient> CatalogFacade<C> {
    /// Wrap a catalog client in the reconciliation facade.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Access the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create or update `desired` on the entry so it carries exactly one tag
    /// for the desired template.
    ///
    /// Lists the entry's tags once and scans for a tag whose `template`
    /// matches `desired.template`. If none matches, `desired` is created on
    /// the entry; otherwise the catalog is told to update using `desired` as
    /// the payload. The first matching tag in listing order wins when the
    /// entry (anomalously) carries several tags of the same template.
    ///
    /// Exactly one of create or update is issued per call; delete is never
    /// issued. The desired tag's `name` plays no part in the decision.
    ///
    /// # Errors
    ///
    /// Propagates any error from the listing read or the chosen write,
    /// unmodified.
    pub async fn upsert_tag(&self, entry: &str, desired: &Tag) -> Result<Tag, CatalogError> {
        let current = self.client.list_tags(entry).await?;
        debug!(
            "Listed {} tag(s) on entry {} for upsert of template {}",
            current.len(),
            entry,
            desired.template
        );

        // First match in listing order wins
        match current.iter().find(|t| t.template == desired.template) {
            None => {
                info!(
                    "No tag with template {} on entry {}, creating",
                    desired.template, entry
                );
                self.client.create_tag(entry, desired).await
            }
            Some(existing) => {
                info!(
                    "Tag {} already instantiates template {} on entry {}, updating",
                    existing.name, desired.template, entry
                );
                self.client.update_tag(desired).await
            }
        }
    }

    /// Delete the tag on the entry that instantiates `reference.template`.
    ///
    /// Lists the entry's tags once and scans for a tag whose `template`
    /// matches the reference tag's. The reference tag is purely a matching
    /// key: its fields and `name` are ignored, and the delete is issued
    /// against the *found* tag's persisted name. When no tag matches, the
    /// call completes as a no-op without any write.
    ///
    /// # Errors
    ///
    /// Propagates any error from the listing read or the delete write,
    /// unmodified.
    pub async fn delete_tag(&self, entry: &str, reference: &Tag) -> Result<(), CatalogError> {
        let current = self.client.list_tags(entry).await?;
        debug!(
            "Listed {} tag(s) on entry {} for delete of template {}",
            current.len(),
            entry,
            reference.template
        );

        match current.iter().find(|t| t.template == reference.template) {
            None => {
                debug!(
                    "No tag with template {} on entry {}, nothing to delete",
                    reference.template, entry
                );
                Ok(())
            }
            Some(existing) => {
                info!(
                    "Deleting tag {} (template {}) from entry {}",
                    existing.name, reference.template, entry
                );
                self.client.delete_tag(&existing.name).await
            }
        }
    }

    /// Fetch an entry by name. Pure pass-through to the catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from the catalog, unmodified.
    pub async fn get_entry(&self, name: &str) -> Result<Entry, CatalogError> {
        self.client.get_entry(name).await
    }

    /// Fetch a tag template by identifier. Pure pass-through to the catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from the catalog, unmodified.
    pub async fn get_tag_template(&self, name: &str) -> Result<TagTemplate, CatalogError> {
        self.client.get_tag_template(name).await
    }

    /// Resolve an entry from its linked external resource. Pure pass-through
    /// to the catalog.
    ///
    /// # Errors
    ///
    /// Propagates any error from the catalog, unmodified.
    pub async fn lookup_entry(&self, linked_resource: &str) -> Result<Entry, CatalogError> {
        self.client.lookup_entry(linked_resource).await
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Data model for catalog entries, tag templates, and tags.
//!
//! This module defines the value types exchanged with the remote data catalog:
//!
//! - [`Entry`] - A catalogued data asset, referenced by an opaque name
//! - [`TagTemplate`] - A named schema describing the fields a tag may carry
//! - [`Tag`] - A structured annotation attached to an entry, instantiating a template
//! - [`FieldValue`] - The typed value of a single tag field
//!
//! Entries and templates are owned by the remote catalog; this crate only ever
//! references them by identifier. Tags are the one type the reconciler inspects,
//! and even there it only looks at the `template` identifier - field contents are
//! opaque payload passed through to the catalog.
//!
//! # Example: Building a Tag
//!
//! ```rust
//! use tagkeeper::model::{FieldValue, Tag};
//!
//! let tag = Tag::new("projects/acme/tagTemplates/data_owner")
//!     .with_field("owner", FieldValue::String("data-eng".to_string()))
//!     .with_field("certified", FieldValue::Bool(true));
//!
//! assert!(tag.name.is_empty()); // name is assigned by the catalog on create
//! assert_eq!(tag.fields.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A catalogued data asset, referenced by an opaque name.
///
/// Entries are owned entirely by the remote catalog. The reconciler never
/// interprets an entry beyond carrying its `name` into API calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Catalog-assigned resource name (e.g. `projects/p/locations/l/entries/e`)
    pub name: String,

    /// The external resource this entry describes (e.g. a table or bucket URI)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linked_resource: String,

    /// Catalog-defined entry type (e.g. `TABLE`, `FILESET`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entry_type: String,
}

/// A named schema describing the field set a tag may carry.
///
/// Templates are referenced by identifier only; their field definitions are not
/// modeled here because the reconciler never inspects them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagTemplate {
    /// Catalog-assigned resource name (e.g. `projects/p/locations/l/tagTemplates/t`)
    pub name: String,

    /// Human-readable template name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

/// The typed value of a single tag field.
///
/// The catalog supports exactly five value kinds. Every site that constructs or
/// compares field values matches exhaustively on this enum, so adding a kind is
/// a compile-time-visible change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    /// Boolean field value
    Bool(bool),

    /// Double-precision numeric field value
    Double(f64),

    /// Free-form string field value
    String(String),

    /// UTC timestamp field value
    Timestamp(DateTime<Utc>),

    /// Enumerated field value, carried by display name
    #[serde(rename_all = "camelCase")]
    Enum {
        /// Display name of the selected enum member
        display_name: String,
    },
}

impl FieldValue {
    /// Short kind label, used in log lines and error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
            Self::Enum { .. } => "enum",
        }
    }
}

/// A structured annotation attached to an entry, instantiating a [`TagTemplate`].
///
/// The `template` identifier is the reconciliation key: the facade treats two
/// tags as "the same" tag when their templates match, regardless of fields.
/// `name` is only populated once the catalog has persisted the tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Catalog-assigned resource name; empty until the tag is created
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Identifier of the template this tag instantiates
    pub template: String,

    /// Field values keyed by field id, opaque to reconciliation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Tag {
    /// Create an unpersisted tag for the given template, with no fields.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            template: template.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach a field value.
    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(id.into(), value);
        self
    }

    /// Look up a field value by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldValue> {
        self.fields.get(id)
    }

    /// True once the catalog has assigned this tag a persisted name.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.name.is_empty()
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Tagkeeper - Tag Reconciliation for Remote Data Catalogs
//!
//! Tagkeeper is a small library and CLI for keeping structured tags on data
//! catalog entries in their desired state. Its core is a stateless
//! read-then-decide-then-write reconciler: list the tags on an entry, find the
//! one instantiating the desired template, and issue exactly one create,
//! update, or delete against the catalog.
//!
//! ## Overview
//!
//! This library provides:
//!
//! - A data model for entries, tag templates, and typed tag fields
//! - The [`CatalogClient`](client::CatalogClient) trait abstracting the catalog API
//! - The [`CatalogFacade`](facade::CatalogFacade) reconciler built on that trait
//! - A production HTTP/JSON client with retrying transport
//!
//! ## Modules
//!
//! - [`model`] - Entry, tag, template, and field value types
//! - [`client`] - The catalog capability contract
//! - [`facade`] - Upsert/delete reconciliation and pass-through reads
//! - [`rest`] - HTTP/JSON catalog client
//! - [`catalog_errors`] - Error taxonomy for catalog operations
//! - [`http_errors`] - HTTP status code mapping
//! - [`retry`] - Exponential backoff for transient transport failures
//!
//! ## Example
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
//!     .with_field("owner", FieldValue::String("data-eng".to_string()))
//!     .with_field("certified", FieldValue::Bool(true));
//!
//! // One listing read, then exactly one create or update
//! facade.upsert_tag("projects/acme/entries/orders", &desired).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - **Stateless** - Nothing cached or carried between calls
//! - **Single-shot** - One read, at most one write per operation
//! - **Transparent errors** - Catalog failures propagate unmodified
//! - **First match wins** - Documented tie-break when an entry carries
//!   duplicate templates

pub mod catalog_errors;
pub mod client;
pub mod constants;
pub mod facade;
pub mod http_errors;
pub mod model;
pub mod rest;
pub mod retry;

#[cfg(test)]
mod rest_tests;

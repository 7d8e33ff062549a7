// Common test utilities for integration tests

use serde_json::json;
use tagkeeper::facade::CatalogFacade;
use tagkeeper::model::{FieldValue, Tag};
use tagkeeper::rest::RestCatalogClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ENTRY: &str = "projects/acme/locations/us/entries/orders";
pub const TEMPLATE: &str = "projects/acme/locations/us/tagTemplates/data_owner";

/// Start a mocked catalog and a facade wired to it
pub async fn start_catalog() -> (MockServer, CatalogFacade<RestCatalogClient>) {
    let server = MockServer::start().await;
    let client = RestCatalogClient::new(server.uri().parse().unwrap(), None).unwrap();
    (server, CatalogFacade::new(client))
}

/// Desired tag with a representative spread of field kinds
pub fn desired_tag() -> Tag {
    Tag::new(TEMPLATE)
        .with_field("owner", FieldValue::String("data-eng".to_string()))
        .with_field("certified", FieldValue::Bool(true))
        .with_field("quality_score", FieldValue::Double(0.97))
}

/// Mount a tag listing for the test entry
pub async fn mount_listing(server: &MockServer, tags: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{ENTRY}/tags")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tags": tags })))
        .expect(1)
        .mount(server)
        .await;
}

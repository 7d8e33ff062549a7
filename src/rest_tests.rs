// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the HTTP/JSON catalog client, against a mocked HTTP server.

#[cfg(test)]
mod tests {
    use crate::catalog_errors::CatalogError;
    use crate::client::CatalogClient;
    use crate::model::{FieldValue, Tag};
    use crate::rest::RestCatalogClient;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENTRY: &str = "projects/acme/locations/us/entries/orders";
    const TEMPLATE: &str = "projects/acme/locations/us/tagTemplates/data_owner";

    async fn client_for(server: &MockServer) -> RestCatalogClient {
        RestCatalogClient::new(server.uri().parse().unwrap(), None).unwrap()
    }

    #[tokio::test]
    async fn test_list_tags_parses_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tags": [
                    {"name": format!("{ENTRY}/tags/n1"), "template": TEMPLATE}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tags = client_for(&server).await.list_tags(ENTRY).await.unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].template, TEMPLATE);
        assert!(tags[0].is_persisted());
    }

    #[tokio::test]
    async fn test_list_tags_tolerates_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let tags = client_for(&server).await.list_tags(ENTRY).await.unwrap();

        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_posts_to_tag_collection() {
        let desired =
            Tag::new(TEMPLATE).with_field("owner", FieldValue::String("data-eng".to_string()));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .and(body_json(&desired))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": format!("{ENTRY}/tags/n1"),
                "template": TEMPLATE,
                "fields": {"owner": {"string": "data-eng"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .await
            .create_tag(ENTRY, &desired)
            .await
            .unwrap();

        assert_eq!(created.name, format!("{ENTRY}/tags/n1"));
    }

    #[tokio::test]
    async fn test_update_tag_patches_persisted_name() {
        let mut tag =
            Tag::new(TEMPLATE).with_field("owner", FieldValue::String("governance".to_string()));
        tag.name = format!("{ENTRY}/tags/n1");

        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(format!("/v1/{ENTRY}/tags/n1")))
            .and(body_json(&tag))
            .respond_with(ResponseTemplate::new(200).set_body_json(&tag))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server).await.update_tag(&tag).await.unwrap();

        assert_eq!(updated, tag);
    }

    #[tokio::test]
    async fn test_update_unpersisted_tag_rejected_before_any_request() {
        let server = MockServer::start().await;
        // No mock mounted: any request would fail the test via 404 mapping
        let tag = Tag::new(TEMPLATE);

        let err = client_for(&server).await.update_tag(&tag).await.unwrap_err();

        assert!(matches!(err, CatalogError::InvalidTagData { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_tag_issues_delete() {
        let name = format!("{ENTRY}/tags/n1");

        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/v1/{name}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.delete_tag(&name).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_entry_fetches_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": ENTRY,
                "linkedResource": "//warehouse.example.com/datasets/orders",
                "entryType": "TABLE"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entry = client_for(&server).await.get_entry(ENTRY).await.unwrap();

        assert_eq!(entry.name, ENTRY);
        assert_eq!(entry.entry_type, "TABLE");
    }

    #[tokio::test]
    async fn test_get_tag_template_fetches_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{TEMPLATE}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": TEMPLATE,
                "displayName": "Data Owner"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let template = client_for(&server)
            .await
            .get_tag_template(TEMPLATE)
            .await
            .unwrap();

        assert_eq!(template.display_name, "Data Owner");
    }

    #[tokio::test]
    async fn test_lookup_entry_sends_linked_resource_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/entries:lookup"))
            .and(query_param(
                "linkedResource",
                "//warehouse.example.com/datasets/orders",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": ENTRY,
                "linkedResource": "//warehouse.example.com/datasets/orders"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entry = client_for(&server)
            .await
            .lookup_entry("//warehouse.example.com/datasets/orders")
            .await
            .unwrap();

        assert_eq!(entry.name, ENTRY);
    }

    #[tokio::test]
    async fn test_bearer_token_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}")))
            .and(header("Authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": ENTRY})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            RestCatalogClient::new(server.uri().parse().unwrap(), Some("sekrit".to_string()))
                .unwrap();

        client.get_entry(ENTRY).await.unwrap();
    }

    #[tokio::test]
    async fn test_404_maps_to_entry_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_entry(ENTRY).await.unwrap_err();

        assert!(matches!(err, CatalogError::EntryNotFound { entry } if entry == ENTRY));
    }

    #[tokio::test]
    async fn test_403_fails_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).await.list_tags(ENTRY).await.unwrap_err();

        assert_eq!(err.reason(), "PermissionDenied");
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_503_retried_until_success() {
        let server = MockServer::start().await;
        // First attempt gets a 503, the retry a 200
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/{ENTRY}/tags")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tags = client_for(&server).await.list_tags(ENTRY).await.unwrap();

        assert!(tags.is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}

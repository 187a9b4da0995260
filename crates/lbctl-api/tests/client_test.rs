// Integration tests for `LoadBalancerClient` using wiremock.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lbctl_api::types::{
    AclAction, AclArgument, AclArgumentValue, CreateTargetRequest, PatchAclRequest,
    PatchListenerRequest,
};
use lbctl_api::{
    AclService, ClusterService, Error, Filter, ListParams, ListenerService, LoadBalancerClient,
    TargetService, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LoadBalancerClient) {
    let server = MockServer::start().await;
    let client = LoadBalancerClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn cluster(id: i32, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "deployed": true, "deployed_at": "2024-05-01T10:00:00Z" })
}

fn pagination(current: u32, total_pages: u32) -> serde_json::Value {
    json!({
        "pagination": {
            "total": 3, "count": 1, "per_page": 2,
            "current_page": current, "total_pages": total_pages
        }
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_walks_every_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [cluster(1, "web"), cluster(2, "api")],
            "meta": pagination(1, 2),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [cluster(3, "mail")],
            "meta": pagination(2, 2),
        })))
        .mount(&server)
        .await;

    let clusters = client.get_clusters(&ListParams::default()).await.unwrap();

    let names: Vec<&str> = clusters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["web", "api", "mail"]);
    assert!(clusters[0].deployed);
    assert!(clusters[0].deployed_at.is_some());
}

#[tokio::test]
async fn test_list_fixed_page_sends_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/acls"))
        .and(query_param("listener_id", "12"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 7, "name": "block", "listener_id": 12 }],
            "meta": pagination(3, 5),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListParams {
        page: Some(3),
        ..ListParams::default()
    }
    .with_filter(Filter::equals("listener_id", 12));

    let acls = client.get_acls(&params).await.unwrap();
    assert_eq!(acls.len(), 1);
    assert_eq!(acls[0].listener_id, Some(12));
    assert!(acls[0].conditions.is_empty());
}

#[tokio::test]
async fn test_get_listener() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/listeners/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 4, "name": "frontend", "cluster_id": 1, "mode": "https",
                "hsts_enabled": true, "hsts_maxage": 300,
                "default_target_group_id": 9
            }
        })))
        .mount(&server)
        .await;

    let listener = client.get_listener(4).await.unwrap();
    assert_eq!(listener.name, "frontend");
    assert_eq!(listener.mode.to_string(), "https");
    assert_eq!(listener.default_target_group_id, Some(9));
    assert!(!listener.redirect_https);
}

#[tokio::test]
async fn test_create_target_returns_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/target-groups/3/targets"))
        .and(body_json(json!({ "ip": "10.0.0.5", "port": 8080, "weight": 10 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": 55 } })))
        .mount(&server)
        .await;

    let req = CreateTargetRequest {
        name: None,
        ip: "10.0.0.5".into(),
        port: 8080,
        weight: Some(10),
        backup: None,
        check_interval: None,
        check_ssl: None,
        check_rise: None,
        check_fall: None,
        disable_http2: None,
        http2_only: None,
        active: None,
    };
    let id = client.create_target(3, &req).await.unwrap();
    assert_eq!(id, 55);
}

#[tokio::test]
async fn test_patch_sends_only_set_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/listeners/4"))
        .and(body_json(json!({ "name": "renamed", "hsts_enabled": false })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let req = PatchListenerRequest {
        name: Some("renamed".into()),
        hsts_enabled: Some(false),
        ..PatchListenerRequest::default()
    };
    client.patch_listener(4, &req).await.unwrap();
}

#[tokio::test]
async fn test_patch_acl_actions() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/acls/8"))
        .and(body_json(json!({
            "actions": [{
                "name": "redirect",
                "arguments": { "location": { "name": "location", "value": "https://x" } }
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut action = AclAction {
        name: "redirect".into(),
        arguments: Default::default(),
    };
    action.arguments.insert(
        "location".into(),
        AclArgument {
            name: "location".into(),
            value: AclArgumentValue::Single("https://x".into()),
        },
    );
    let req = PatchAclRequest {
        actions: Some(vec![action]),
        ..PatchAclRequest::default()
    };
    client.patch_acl(8, &req).await.unwrap();
}

#[tokio::test]
async fn test_deploy_posts_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/clusters/2/deploy"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.deploy_cluster(2).await.unwrap();
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let key = secrecy::SecretString::from("s3cr3t".to_string());
    let client =
        LoadBalancerClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();

    Mock::given(method("DELETE"))
        .and(path("/v2/clusters/5"))
        .and(header("authorization", "s3cr3t"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_cluster(5).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_cluster(1).await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "title": "Not found", "detail": "Cluster with ID '99' not found" }]
        })))
        .mount(&server)
        .await;

    let err = client.get_cluster(99).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found: Cluster with ID '99' not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/acls/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client.delete_acl(3).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let result = client.get_cluster(1).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

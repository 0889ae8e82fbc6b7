use super::*;
use crate::api::test_support::authed_gateway;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn create_then_list() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/dns")
        .match_header("authorization", "Bearer T")
        .match_body(Matcher::Json(json!({ "title": "Main", "url": "http://dns.example:8080" })))
        .with_status(200)
        .with_body(r#"{"id":"d1","title":"Main","url":"http://dns.example:8080","active":true,"created_at":"2025-01-01T00:00:00+00:00"}"#)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/dns")
        .with_status(200)
        .with_body(r#"[{"id":"d1","title":"Main","url":"http://dns.example:8080","active":true}]"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let new = NewDnsServer { title: "Main".into(), url: "http://dns.example:8080".into(), active: None };
    let created = gateway.dns().create(&new).await.unwrap();
    assert_eq!(created.id, "d1");

    let servers = gateway.dns().list().await.unwrap();
    assert_eq!(servers, vec![DnsServer { created_at: None, ..created }]);

    create.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn update_sends_partial_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/dns/d1")
        .match_body(Matcher::Json(json!({ "active": false })))
        .with_status(200)
        .with_body(r#"{"id":"d1","title":"Main","url":"http://dns.example","active":false}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let update = DnsServerUpdate { active: Some(false), ..DnsServerUpdate::default() };
    let updated = gateway.dns().update("d1", &update).await.unwrap();
    assert!(!updated.active);

    mock.assert_async().await;
}

#[tokio::test]
async fn delete_unknown_server_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/dns/zz")
        .with_status(404)
        .with_body(r#"{"detail":"DNS not found"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let err = gateway.dns().delete("zz").await.unwrap_err();
    assert_eq!(err.detail(), Some("DNS not found"));
}

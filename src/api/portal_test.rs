use super::*;
use std::sync::Arc;

use crate::api::test_support::customer_json;
use crate::config::ClientConfig;
use crate::credential::MemoryCredentialStore;
use mockito::Matcher;
use serde_json::json;
use time::macros::datetime;

fn view_expiring(expires_at: &str) -> PortalView {
    let mut user = customer_json("u1", "ana");
    user["expires_at"] = json!(expires_at);
    serde_json::from_value(json!({
        "user": user,
        "dns": null,
        "payments": [],
        "whatsapp_support": "+55 (11) 99999-0000"
    }))
    .unwrap()
}

#[tokio::test]
async fn portal_is_fetched_without_credential() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/portal/ana")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(
            json!({
                "user": customer_json("u1", "ana"),
                "dns": { "id": "d1", "title": "Main", "url": "http://dns.example", "active": true },
                "payments": [],
                "whatsapp_support": "5511999990000"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = ClientConfig::new(&server.url()).unwrap();
    let gateway = Gateway::new(&config, Arc::new(MemoryCredentialStore::with_token("operator"))).unwrap();
    let view = gateway.portal().view("ana").await.unwrap();
    assert_eq!(view.dns.map(|d| d.title).as_deref(), Some("Main"));

    mock.assert_async().await;
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/portal/ghost")
        .with_status(404)
        .with_body(r#"{"detail":"User not found"}"#)
        .create_async()
        .await;

    let config = ClientConfig::new(&server.url()).unwrap();
    let gateway = Gateway::new(&config, Arc::new(MemoryCredentialStore::new())).unwrap();
    let err = gateway.portal().view("ghost").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn days_remaining_truncates_and_flags_expiry() {
    let now = datetime!(2025-03-01 12:00 UTC);

    let active = view_expiring("2025-03-11T11:00:00+00:00");
    assert_eq!(active.days_remaining(now), Some(9));
    assert!(!active.is_expired(now));

    let today = view_expiring("2025-03-01");
    assert_eq!(today.days_remaining(now), Some(0));
    assert!(!today.is_expired(now));

    let lapsed = view_expiring("2025-02-27T12:00:00");
    assert_eq!(lapsed.days_remaining(now), Some(-2));
    assert!(lapsed.is_expired(now));
}

#[test]
fn unparseable_expiry_is_unknown_not_expired() {
    let view = view_expiring("soon");
    let now = datetime!(2025-03-01 12:00 UTC);
    assert_eq!(view.days_remaining(now), None);
    assert!(!view.is_expired(now));
}

#[test]
fn whatsapp_link_keeps_digits_only() {
    assert_eq!(whatsapp_link("+55 (11) 99999-0000").as_deref(), Some("https://wa.me/5511999990000"));
    assert_eq!(whatsapp_link(""), None);
    assert_eq!(whatsapp_link("n/a"), None);
    assert_eq!(view_expiring("2025-03-01").support_link().as_deref(), Some("https://wa.me/5511999990000"));
}

use super::*;
use crate::api::test_support::authed_gateway;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn get_and_update_settings() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", "/api/settings")
        .with_status(200)
        .with_body(r#"{"id":"system_settings","whatsapp_support":"","welcome_message":"Bem-vindo!","whatsapp_enabled":false}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/settings")
        .match_body(Matcher::Json(json!({ "whatsapp_support": "5511999990000", "whatsapp_enabled": true })))
        .with_status(200)
        .with_body(r#"{"whatsapp_support":"5511999990000","welcome_message":"Bem-vindo!","whatsapp_enabled":true}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let current = gateway.settings().get().await.unwrap();
    assert_eq!(current.welcome_message, "Bem-vindo!");

    let update = SettingsUpdate {
        whatsapp_support: Some("5511999990000".into()),
        whatsapp_enabled: Some(true),
        ..SettingsUpdate::default()
    };
    let updated = gateway.settings().update(&update).await.unwrap();
    assert!(updated.whatsapp_enabled);

    get.assert_async().await;
    put.assert_async().await;
}

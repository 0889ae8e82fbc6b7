use super::*;
use crate::api::test_support::authed_gateway;
use mockito::Matcher;

#[tokio::test]
async fn create_sends_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/templates")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "Lembrete".into()),
            Matcher::UrlEncoded("message".into(), "Seu plano vence em breve & renove".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"t1","name":"Lembrete","message":"Seu plano vence em breve & renove","created_at":"2025-01-01T00:00:00+00:00"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let created = gateway.templates().create("Lembrete", "Seu plano vence em breve & renove").await.unwrap();
    assert_eq!(created.id, "t1");

    mock.assert_async().await;
}

#[tokio::test]
async fn list_propagates_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server.mock("GET", "/api/templates").with_status(500).create_async().await;

    let gateway = authed_gateway(&server.url());
    let err = gateway.templates().list().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn delete_template() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/templates/t1")
        .with_status(200)
        .with_body(r#"{"message":"Template deleted"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    assert_eq!(gateway.templates().delete("t1").await.unwrap().message, "Template deleted");

    mock.assert_async().await;
}

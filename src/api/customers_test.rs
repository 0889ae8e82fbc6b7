use super::*;
use crate::api::test_support::{authed_gateway, customer_json};
use mockito::Matcher;
use serde_json::json;

fn customer(username: &str, mac: Option<&str>) -> Customer {
    let mut value = customer_json("id", username);
    if let Some(mac) = mac {
        value["mac_address"] = json!(mac);
    }
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn list_decodes_customers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/users")
        .match_header("authorization", "Bearer T")
        .with_status(200)
        .with_body(json!([customer_json("u1", "ana"), customer_json("u2", "bruno")]).to_string())
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let customers = gateway.customers().list().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[1].username, "bruno");

    mock.assert_async().await;
}

#[tokio::test]
async fn create_posts_only_set_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users")
        .match_body(Matcher::Json(json!({
            "username": "ana",
            "password": "pw",
            "dns_id": "d1",
            "expires_at": "2025-06-01",
            "plan_price": 35.0
        })))
        .with_status(200)
        .with_body(customer_json("u1", "ana").to_string())
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let new = NewCustomer {
        username: "ana".into(),
        password: "pw".into(),
        dns_id: "d1".into(),
        expires_at: "2025-06-01".into(),
        plan_price: Some(35.0),
        ..NewCustomer::default()
    };
    let created = gateway.customers().create(&new).await.unwrap();
    assert_eq!(created.id, "u1");

    mock.assert_async().await;
}

#[tokio::test]
async fn update_and_delete_address_the_customer() {
    let mut server = mockito::Server::new_async().await;
    let put = server
        .mock("PUT", "/api/users/u1")
        .match_body(Matcher::Json(json!({ "active": false })))
        .with_status(200)
        .with_body(customer_json("u1", "ana").to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/users/u1")
        .with_status(200)
        .with_body(r#"{"message":"User deleted successfully"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let update = CustomerUpdate { active: Some(false), ..CustomerUpdate::default() };
    gateway.customers().update("u1", &update).await.unwrap();
    let ack = gateway.customers().delete("u1").await.unwrap();
    assert_eq!(ack.message, "User deleted successfully");

    put.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn missing_customer_surfaces_backend_detail() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/users/nope")
        .with_status(404)
        .with_body(r#"{"detail":"User not found"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let err = gateway.customers().delete("nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn validate_reports_unreachable_playlist_as_ok() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/users/u1/validate")
        .with_status(200)
        .with_body(r#"{"valid":false,"message":"HTTP 403"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let result = gateway.customers().validate_m3u("u1").await.unwrap();
    assert!(!result.valid);
    assert_eq!(result.message, "HTTP 403");
}

#[test]
fn filter_matches_username_or_mac_ignoring_case() {
    let customers = vec![
        customer("Ana", Some("AA:BB:CC:00:11:22")),
        customer("bruno", None),
        customer("carla", Some("de:ad:be:ef:00:01")),
    ];

    let names = |term: &str| -> Vec<String> {
        filter_customers(&customers, term).into_iter().map(|c| c.username.clone()).collect()
    };

    assert_eq!(names("an"), vec!["Ana"]);
    assert_eq!(names("aa:bb"), vec!["Ana"]);
    assert_eq!(names("DEAD"), Vec::<String>::new());
    assert_eq!(names("DE:AD"), vec!["carla"]);
    assert_eq!(names(""), vec!["Ana", "bruno", "carla"]);
}

#[test]
fn filter_does_not_trim_the_term() {
    let customers = vec![customer("ana", None), customer("joao silva", None)];
    let names = |term: &str| -> Vec<String> {
        filter_customers(&customers, term).into_iter().map(|c| c.username.clone()).collect()
    };

    assert_eq!(names(" ana"), Vec::<String>::new());
    assert_eq!(names(" silva"), vec!["joao silva"]);
    assert_eq!(names(" "), vec!["joao silva"]);
}

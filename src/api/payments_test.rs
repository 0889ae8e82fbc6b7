use super::*;
use crate::api::test_support::authed_gateway;
use crate::api::types::PaymentMethod;
use mockito::Matcher;
use serde_json::json;

fn payment(amount: f64, status: PaymentStatus) -> Payment {
    Payment {
        id: "p".into(),
        user_id: "u1".into(),
        amount,
        date: None,
        status,
        method: PaymentMethod::Pix,
        notes: None,
    }
}

#[test]
fn revenue_counts_completed_only() {
    let payments = vec![
        payment(30.0, PaymentStatus::Completed),
        payment(15.5, PaymentStatus::Pending),
        payment(20.0, PaymentStatus::Completed),
        payment(99.0, PaymentStatus::Failed),
    ];
    assert!((completed_revenue(&payments) - 50.0).abs() < f64::EPSILON);
    assert!(completed_revenue(&[]).abs() < f64::EPSILON);
}

#[tokio::test]
async fn create_posts_payment() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/payments")
        .match_header("authorization", "Bearer T")
        .match_body(Matcher::Json(json!({
            "user_id": "u1",
            "amount": 30.0,
            "status": "completed",
            "method": "cash",
            "notes": "balcao"
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "p1", "user_id": "u1", "amount": 30.0,
                "date": "2025-01-10T10:00:00+00:00", "status": "completed", "method": "cash", "notes": "balcao"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let new = NewPayment {
        user_id: "u1".into(),
        amount: 30.0,
        status: PaymentStatus::Completed,
        method: PaymentMethod::Cash,
        notes: Some("balcao".into()),
    };
    let created = gateway.payments().create(&new).await.unwrap();
    assert_eq!(created.id, "p1");
    assert_eq!(created.method, PaymentMethod::Cash);

    mock.assert_async().await;
}

#[tokio::test]
async fn list_and_delete() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/payments")
        .with_status(200)
        .with_body(r#"[{"id":"p1","user_id":"u1","amount":10.0,"status":"pending","method":"pix"}]"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/payments/p1")
        .with_status(200)
        .with_body(r#"{"message":"Payment deleted successfully"}"#)
        .create_async()
        .await;

    let gateway = authed_gateway(&server.url());
    let payments = gateway.payments().list().await.unwrap();
    assert_eq!(payments[0].status, PaymentStatus::Pending);
    gateway.payments().delete("p1").await.unwrap();

    list.assert_async().await;
    delete.assert_async().await;
}

use super::*;
use serde_json::json;

#[test]
fn customer_defaults_fill_missing_fields() {
    let customer: Customer = serde_json::from_value(json!({
        "id": "u1",
        "username": "joao",
        "password": "secret",
        "dns_id": "d1",
        "expires_at": "2025-06-01T00:00:00+00:00"
    }))
    .unwrap();

    assert!(customer.active);
    assert_eq!(customer.pin, "0000");
    assert_eq!(customer.mac_address, None);
    assert_eq!(customer.plan_price, None);
}

#[test]
fn customer_update_omits_absent_fields() {
    let update = CustomerUpdate { active: Some(false), plan_price: Some(35.0), ..CustomerUpdate::default() };
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "active": false, "plan_price": 35.0 }));
}

#[test]
fn payment_enums_use_lowercase_wire_names() {
    let payment: Payment = serde_json::from_value(json!({
        "id": "p1",
        "user_id": "u1",
        "amount": 30.5,
        "date": "2025-01-10T10:00:00+00:00",
        "status": "pending",
        "method": "card"
    }))
    .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.method, PaymentMethod::Card);

    let new = NewPayment {
        user_id: "u1".into(),
        amount: 10.0,
        status: PaymentStatus::default(),
        method: PaymentMethod::default(),
        notes: None,
    };
    assert_eq!(
        serde_json::to_value(&new).unwrap(),
        json!({ "user_id": "u1", "amount": 10.0, "status": "completed", "method": "pix" })
    );
}

#[test]
fn settings_tolerate_missing_whatsapp_fields() {
    let settings: Settings = serde_json::from_value(json!({ "whatsapp_support": "+55 11 99999-0000" })).unwrap();
    assert_eq!(settings.whatsapp_support, "+55 11 99999-0000");
    assert!(!settings.whatsapp_enabled);
    assert_eq!(settings.whatsapp_token, "");
}

#[test]
fn portal_view_without_dns() {
    let view: PortalView = serde_json::from_value(json!({
        "user": {
            "id": "u1", "username": "joao", "password": "x", "dns_id": "gone",
            "expires_at": "2025-06-01"
        },
        "dns": null,
        "payments": [],
        "whatsapp_support": ""
    }))
    .unwrap();
    assert!(view.dns.is_none());
    assert_eq!(view.user.username, "joao");
}

#[test]
fn whatsapp_message_omits_fallback_fields() {
    let msg = WhatsAppMessage { user_id: "u1".into(), phone: None, message: None };
    assert_eq!(serde_json::to_value(&msg).unwrap(), json!({ "user_id": "u1" }));
}

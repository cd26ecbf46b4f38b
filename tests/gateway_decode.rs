use charity_portal::domain::payment::parse_amount_minor;
use charity_portal::gateways::sslcommerz::{decode_session_response, decode_validation_response};
use charity_portal::gateways::GatewayError;
use serde_json::json;

#[test]
fn session_success_yields_redirect_url() {
    let body = json!({
        "status": "SUCCESS",
        "GatewayPageURL": "https://sandbox.sslcommerz.com/EasyCheckOut/abc123",
        "sessionkey": "sess_1",
    });

    let outcome = decode_session_response(&body).unwrap();
    assert_eq!(
        outcome.redirect_url,
        "https://sandbox.sslcommerz.com/EasyCheckOut/abc123"
    );
    assert_eq!(outcome.session_key.as_deref(), Some("sess_1"));
}

#[test]
fn session_failure_is_a_typed_decline() {
    let body = json!({ "status": "FAILED", "failedreason": "store credential error" });

    match decode_session_response(&body) {
        Err(GatewayError::Declined(reason)) => assert!(reason.contains("credential")),
        other => panic!("expected Declined, got {other:?}"),
    }
}

#[test]
fn session_success_without_url_is_declined() {
    let body = json!({ "status": "SUCCESS", "GatewayPageURL": "" });
    assert!(matches!(
        decode_session_response(&body),
        Err(GatewayError::Declined(_))
    ));
}

#[test]
fn validation_response_maps_amount_to_minor_units() {
    let body = json!({
        "status": "VALID",
        "amount": "500.00",
        "currency": "BDT",
        "bank_tran_id": "BANK123",
    });

    let check = decode_validation_response(body);
    assert!(check.reports_valid());
    assert_eq!(check.amount_minor, Some(50_000));
    assert_eq!(check.currency.as_deref(), Some("BDT"));
    assert_eq!(
        check.raw.get("bank_tran_id").and_then(|v| v.as_str()),
        Some("BANK123")
    );
}

#[test]
fn validation_without_status_is_invalid() {
    let check = decode_validation_response(json!({}));
    assert!(!check.reports_valid());
    assert_eq!(check.amount_minor, None);
}

#[test]
fn amount_parsing_accepts_plain_and_two_decimal_forms() {
    assert_eq!(parse_amount_minor("500"), Some(50_000));
    assert_eq!(parse_amount_minor("500.00"), Some(50_000));
    assert_eq!(parse_amount_minor("500.5"), Some(50_050));
    assert_eq!(parse_amount_minor("0.05"), Some(5));
    assert_eq!(parse_amount_minor(" 12.34 "), Some(1_234));
}

#[test]
fn amount_parsing_rejects_anything_that_could_alias_a_stored_amount() {
    assert_eq!(parse_amount_minor(""), None);
    assert_eq!(parse_amount_minor("-500"), None);
    assert_eq!(parse_amount_minor("+500"), None);
    assert_eq!(parse_amount_minor("500.123"), None);
    assert_eq!(parse_amount_minor("12,34"), None);
    assert_eq!(parse_amount_minor(".50"), None);
    assert_eq!(parse_amount_minor("abc"), None);
}

use charity_portal::gateways::mock::MockProvider;
use charity_portal::gateways::{GatewayError, InitiateRequest, Passthrough, PaymentProvider};
use uuid::Uuid;

fn request(tran_ref: &str) -> InitiateRequest {
    InitiateRequest {
        amount_minor: 50_000,
        currency: "BDT".to_string(),
        tran_ref: tran_ref.to_string(),
        product_name: "general donation".to_string(),
        method_hint: "bkash".to_string(),
        payer_name: "payer@example.org".to_string(),
        payer_email: "payer@example.org".to_string(),
        payer_phone: None,
        success_url: "http://localhost:3000/payments/callback/success".to_string(),
        fail_url: "http://localhost:3000/payments/callback/fail".to_string(),
        cancel_url: "http://localhost:3000/payments/callback/cancel".to_string(),
        ipn_url: "http://localhost:3000/payments/ipn".to_string(),
        passthrough: Passthrough {
            payment_id: Uuid::new_v4(),
            payer_id: Uuid::new_v4(),
            campaign_id: None,
            note: None,
        },
    }
}

fn provider(behavior: &str) -> MockProvider {
    MockProvider {
        behavior: behavior.to_string(),
        validation_status: "VALID".to_string(),
        validation_amount_minor: Some(50_000),
        validation_currency: Some("BDT".to_string()),
    }
}

#[tokio::test]
async fn default_behavior_returns_a_redirect() {
    let outcome = provider("REDIRECT")
        .initiate(&request("CHP-abc-1"))
        .await
        .unwrap();

    assert!(outcome.redirect_url.contains("CHP-abc-1"));
    assert!(outcome.session_key.is_some());
}

#[tokio::test]
async fn decline_and_timeout_behaviors_are_typed() {
    assert!(matches!(
        provider("DECLINE").initiate(&request("t")).await,
        Err(GatewayError::Declined(_))
    ));
    assert!(matches!(
        provider("TIMEOUT").initiate(&request("t")).await,
        Err(GatewayError::Timeout)
    ));
    assert!(matches!(
        provider("MISCONFIGURED").initiate(&request("t")).await,
        Err(GatewayError::Misconfigured)
    ));
}

#[tokio::test]
async fn validate_reports_the_configured_view() {
    let check = provider("REDIRECT").validate("val-1").await.unwrap();
    assert!(check.reports_valid());
    assert_eq!(check.amount_minor, Some(50_000));
    assert_eq!(check.currency.as_deref(), Some("BDT"));
}

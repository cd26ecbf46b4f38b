use charity_portal::domain::payment::{PaymentKind, PaymentMethod, PaymentStatus};
use charity_portal::repo::payments_repo::StoredPayment;
use charity_portal::service::payment_service::to_view;
use uuid::Uuid;

fn stored(kind: &str, method: &str, status: &str) -> StoredPayment {
    StoredPayment {
        payment_id: Uuid::new_v4(),
        tran_ref: "CHP-abc-1".to_string(),
        kind: kind.to_string(),
        method: method.to_string(),
        status: status.to_string(),
        amount_minor: 50_000,
        currency: "BDT".to_string(),
        payer_id: Uuid::new_v4(),
        campaign_id: None,
        fee_month: None,
        fee_year: None,
        note: None,
        metadata: serde_json::json!({}),
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn stored_strings_map_to_closed_enums() {
    let view = to_view(stored("DONATION", "BKASH", "SUCCEEDED")).unwrap();
    assert_eq!(view.kind, PaymentKind::Donation);
    assert_eq!(view.method, PaymentMethod::Bkash);
    assert_eq!(view.status, PaymentStatus::Succeeded);
    assert_eq!(view.amount_minor, 50_000);

    let view = to_view(stored("MONTHLY_FEE", "CASH", "PAID")).unwrap();
    assert_eq!(view.kind, PaymentKind::MonthlyFee);
    assert_eq!(view.status, PaymentStatus::Paid);
}

#[test]
fn unrecognized_stored_status_is_an_error_not_a_panic() {
    assert!(to_view(stored("DONATION", "CARD", "SETTLED")).is_err());
    assert!(to_view(stored("PLEDGE", "CARD", "INITIATED")).is_err());
    assert!(to_view(stored("DONATION", "CHEQUE", "INITIATED")).is_err());
}

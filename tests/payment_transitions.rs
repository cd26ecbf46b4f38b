use charity_portal::domain::payment::{
    plan_callback_transition, CallbackClaim, PaymentKind, PaymentStatus, ProviderCheck,
    TransitionInput, TransitionPlan,
};

fn donation(amount_minor: i64) -> TransitionInput {
    TransitionInput {
        status: PaymentStatus::Initiated,
        kind: PaymentKind::Donation,
        amount_minor,
        currency: "BDT".to_string(),
        credits_campaign: true,
    }
}

fn valid_check(amount_minor: i64) -> ProviderCheck {
    ProviderCheck {
        status: "VALID".to_string(),
        amount_minor: Some(amount_minor),
        currency: Some("BDT".to_string()),
        raw: serde_json::json!({}),
    }
}

#[test]
fn validated_matching_callback_settles_and_credits_stored_amount() {
    let plan = plan_callback_transition(
        &donation(50_000),
        CallbackClaim::Success,
        Some(&valid_check(50_000)),
    );

    assert_eq!(
        plan,
        TransitionPlan::Settle {
            to: PaymentStatus::Succeeded,
            credit_minor: Some(50_000),
        }
    );
}

#[test]
fn terminal_record_is_never_mutated_again() {
    let mut record = donation(50_000);
    record.status = PaymentStatus::Succeeded;

    let plan = plan_callback_transition(
        &record,
        CallbackClaim::Success,
        Some(&valid_check(50_000)),
    );
    assert_eq!(plan, TransitionPlan::AlreadySettled);

    record.status = PaymentStatus::Failed;
    let plan = plan_callback_transition(&record, CallbackClaim::Failure, None);
    assert_eq!(plan, TransitionPlan::AlreadySettled);
}

#[test]
fn amount_mismatch_fails_even_when_provider_reports_valid() {
    let plan = plan_callback_transition(
        &donation(30_000),
        CallbackClaim::Success,
        Some(&valid_check(50_000)),
    );

    match plan {
        TransitionPlan::Fail { reason } => assert!(reason.contains("amount mismatch")),
        other => panic!("expected Fail, got {other:?}"),
    }
}

#[test]
fn currency_mismatch_fails() {
    let mut check = valid_check(50_000);
    check.currency = Some("USD".to_string());

    let plan = plan_callback_transition(&donation(50_000), CallbackClaim::Success, Some(&check));
    match plan {
        TransitionPlan::Fail { reason } => assert!(reason.contains("currency mismatch")),
        other => panic!("expected Fail, got {other:?}"),
    }
}

#[test]
fn invalid_provider_status_fails() {
    let mut check = valid_check(50_000);
    check.status = "INVALID_TRANSACTION".to_string();

    let plan = plan_callback_transition(&donation(50_000), CallbackClaim::Success, Some(&check));
    assert!(matches!(plan, TransitionPlan::Fail { .. }));
}

#[test]
fn unverified_success_claim_fails() {
    let plan = plan_callback_transition(&donation(50_000), CallbackClaim::Success, None);
    match plan {
        TransitionPlan::Fail { reason } => assert!(reason.contains("not verified")),
        other => panic!("expected Fail, got {other:?}"),
    }
}

#[test]
fn cancel_claim_fails_without_provider_roundtrip() {
    let plan = plan_callback_transition(&donation(50_000), CallbackClaim::Cancelled, None);
    match plan {
        TransitionPlan::Fail { reason } => assert!(reason.contains("cancelled")),
        other => panic!("expected Fail, got {other:?}"),
    }
}

#[test]
fn fee_record_settles_as_paid_without_campaign_credit() {
    let record = TransitionInput {
        status: PaymentStatus::Initiated,
        kind: PaymentKind::MonthlyFee,
        amount_minor: 20_000,
        currency: "BDT".to_string(),
        credits_campaign: false,
    };

    let plan = plan_callback_transition(
        &record,
        CallbackClaim::Success,
        Some(&valid_check(20_000)),
    );

    assert_eq!(
        plan,
        TransitionPlan::Settle {
            to: PaymentStatus::Paid,
            credit_minor: None,
        }
    );
}

#[test]
fn validated_status_string_is_accepted() {
    let mut check = valid_check(50_000);
    check.status = "VALIDATED".to_string();

    let plan = plan_callback_transition(&donation(50_000), CallbackClaim::Success, Some(&check));
    assert!(matches!(plan, TransitionPlan::Settle { .. }));
}

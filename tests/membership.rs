use charity_portal::repo::members_repo::Member;
use uuid::Uuid;

fn member(status: &str) -> Member {
    Member {
        member_id: Uuid::new_v4(),
        full_name: "Test Member".to_string(),
        email: "member@example.org".to_string(),
        phone: None,
        status: status.to_string(),
        applied_at: chrono::Utc::now(),
    }
}

#[test]
fn only_approved_members_may_pay_fees() {
    assert!(member("APPROVED").is_approved());
    assert!(!member("PENDING").is_approved());
    assert!(!member("REJECTED").is_approved());
}

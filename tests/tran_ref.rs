use charity_portal::domain::tran_ref;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

#[test]
fn ref_carries_the_record_id() {
    let id = Uuid::new_v4();
    let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();

    let tran_ref = tran_ref::build(id, at);
    assert!(tran_ref.starts_with("CHP-"));
    assert_eq!(tran_ref::parse(&tran_ref), Some(id));
}

#[test]
fn wrong_prefix_is_rejected() {
    let id = Uuid::new_v4();
    let tran_ref = format!("XYZ-{}-1700000000", id.simple());
    assert_eq!(tran_ref::parse(&tran_ref), None);
}

#[test]
fn garbage_is_rejected() {
    assert_eq!(tran_ref::parse(""), None);
    assert_eq!(tran_ref::parse("CHP"), None);
    assert_eq!(tran_ref::parse("CHP--"), None);
    assert_eq!(tran_ref::parse("CHP-not-a-uuid"), None);
    assert_eq!(
        tran_ref::parse(&format!("CHP-{}-not-a-ts", Uuid::new_v4().simple())),
        None
    );
}

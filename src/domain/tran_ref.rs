use chrono::{DateTime, Utc};
use uuid::Uuid;

const PREFIX: &str = "CHP";

/// Transaction refs are `CHP-<uuid simple>-<unix ts>` so the originating
/// record id can be recovered from the ref alone, without a lookup table.
pub fn build(payment_id: Uuid, at: DateTime<Utc>) -> String {
    format!("{}-{}-{}", PREFIX, payment_id.simple(), at.timestamp())
}

pub fn parse(tran_ref: &str) -> Option<Uuid> {
    let mut parts = tran_ref.splitn(3, '-');
    if parts.next() != Some(PREFIX) {
        return None;
    }
    let id = Uuid::parse_str(parts.next()?).ok()?;
    parts.next()?.parse::<i64>().ok()?;
    Some(id)
}

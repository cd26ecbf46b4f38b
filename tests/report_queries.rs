use charity_portal::repo::reports_repo::STATUS_METHOD_TOTALS_SQL;

// SUM(bigint) comes back as NUMERIC unless cast; the repo decodes the column
// as i64, so the cast must stay in the statement.
#[test]
fn summed_amount_column_is_cast_back_to_bigint() {
    assert!(STATUS_METHOD_TOTALS_SQL.contains("COALESCE(SUM(amount_minor), 0)::bigint AS total_minor"));
}

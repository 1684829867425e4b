pub fn settlement_report_key(group_id: &str) -> String {
    format!("settlement_report:{}", group_id)
}

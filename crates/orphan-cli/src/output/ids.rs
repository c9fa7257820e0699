//! Comma-separated id output

use orphan_core::OrphanRecord;

pub fn format_ids(records: &[OrphanRecord], id_column: &str) -> String {
    let ids: Vec<String> = records
        .iter()
        .filter_map(|r| r.id(id_column))
        .map(|id| id.to_string())
        .collect();

    if ids.is_empty() {
        return String::new();
    }
    ids.join(",") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ids() {
        let records = vec![OrphanRecord::Id(2), OrphanRecord::Id(5)];
        assert_eq!(format_ids(&records, "comment_ID"), "2,5\n");
        assert_eq!(format_ids(&records[..1], "comment_ID"), "2\n");
    }
}

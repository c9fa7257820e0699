//! YAML output formatter

use anyhow::Result;
use orphan_core::Row;

pub fn format_rows(rows: &[Row]) -> Result<String> {
    Ok(serde_yaml::to_string(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orphan_core::Value;

    #[test]
    fn test_sequence_of_maps() {
        let rows = vec![
            Row::new().with("umeta_id", Value::Integer(77)),
            Row::new().with("umeta_id", Value::Integer(99)),
        ];
        assert_eq!(format_rows(&rows).unwrap(), "- umeta_id: 77\n- umeta_id: 99\n");
    }
}

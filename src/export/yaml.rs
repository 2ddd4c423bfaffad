//! YAML export

use std::io::Write;

use serde::Serialize;

use crate::error::{SpendError, SpendResult};

/// Write any serializable value as YAML under a short header comment
pub fn export_yaml<T: Serialize, W: Write>(value: &T, mut writer: W) -> SpendResult<()> {
    writeln!(writer, "# spendboard export")
        .map_err(|e| SpendError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())
        .map_err(|e| SpendError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, value).map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{Breakdown, GroupBy};
    use crate::storage::sample::sample_expenses;

    #[test]
    fn test_export_breakdown_yaml() {
        let expenses = sample_expenses().unwrap();
        let breakdown = Breakdown::generate(&expenses, GroupBy::Type);

        let mut out = Vec::new();
        export_yaml(&breakdown, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# spendboard export"));
        assert!(text.contains("group_by: type"));
        assert!(text.contains("key: Business"));
        assert!(text.contains("total: 1755.5"));
    }
}

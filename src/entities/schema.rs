// Table schemas: which row position feeds which field name

use crate::error::{Result, WilayahError};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub position: usize,
    pub name: String,
}

/// Ordered list of (position, field name) pairs for one source table.
///
/// Checked once when built; mapping a row afterwards cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    file_name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(file_name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let file_name = file_name.into();

        if columns.is_empty() {
            return Err(WilayahError::InvalidSchema(format!(
                "{}: no columns declared",
                file_name
            )));
        }

        let mut names = HashSet::new();
        let mut positions = HashSet::new();
        for column in &columns {
            if column.name.is_empty() {
                return Err(WilayahError::InvalidSchema(format!(
                    "{}: empty field name at position {}",
                    file_name, column.position
                )));
            }
            if !names.insert(column.name.as_str()) {
                return Err(WilayahError::InvalidSchema(format!(
                    "{}: duplicate field '{}'",
                    file_name, column.name
                )));
            }
            if !positions.insert(column.position) {
                return Err(WilayahError::InvalidSchema(format!(
                    "{}: position {} mapped twice",
                    file_name, column.position
                )));
            }
        }

        Ok(TableSchema { file_name, columns })
    }

    /// Field i of the row → `names[i]`
    pub fn positional(file_name: impl Into<String>, names: &[&str]) -> Result<Self> {
        let columns = names
            .iter()
            .enumerate()
            .map(|(position, name)| Column {
                position,
                name: name.to_string(),
            })
            .collect();
        Self::new(file_name, columns)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_schema() {
        let schema = TableSchema::positional("regencies.csv", &["id", "province_id", "name"]).unwrap();

        assert_eq!(schema.file_name(), "regencies.csv");
        assert_eq!(schema.columns().len(), 3);
        assert_eq!(schema.columns()[2], Column { position: 2, name: "name".to_string() });
    }

    #[test]
    fn test_rejects_empty_schema() {
        let err = TableSchema::positional("x.csv", &[]).unwrap_err();
        assert!(matches!(err, WilayahError::InvalidSchema(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = TableSchema::positional("x.csv", &["id", "name", "id"]).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'id'"));
    }

    #[test]
    fn test_rejects_duplicate_positions() {
        let columns = vec![
            Column { position: 0, name: "id".to_string() },
            Column { position: 0, name: "code".to_string() },
        ];
        let err = TableSchema::new("x.csv", columns).unwrap_err();
        assert!(err.to_string().contains("position 0 mapped twice"));
    }
}

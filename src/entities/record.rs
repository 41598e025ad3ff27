// Record - one mapped row, fields kept in schema order

use super::schema::TableSchema;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    /// Project a raw row through a schema.
    ///
    /// Missing or empty positions become `None`; fields beyond the schema
    /// are ignored.
    pub fn from_row(schema: &TableSchema, row: &[String]) -> Self {
        let fields = schema
            .columns()
            .iter()
            .map(|column| {
                let value = row
                    .get(column.position)
                    .filter(|v| !v.is_empty())
                    .cloned();
                (column.name.clone(), value)
            })
            .collect();

        Record { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn fields(&self) -> &[(String, Option<String>)] {
        &self.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn regency_schema() -> TableSchema {
        TableSchema::positional("regencies.csv", &["id", "province_id", "name"]).unwrap()
    }

    #[test]
    fn test_full_row() {
        let record = Record::from_row(&regency_schema(), &row(&["1101", "11", "Kab. Simeulue"]));

        assert_eq!(record.id(), Some("1101"));
        assert_eq!(record.get("province_id"), Some("11"));
        assert_eq!(record.get("name"), Some("Kab. Simeulue"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_short_row_yields_nulls() {
        let record = Record::from_row(&regency_schema(), &row(&["1101"]));

        assert_eq!(record.id(), Some("1101"));
        assert_eq!(record.get("province_id"), None);
        assert_eq!(record.get("name"), None);
        assert_eq!(record.fields().len(), 3);
    }

    #[test]
    fn test_empty_field_is_null_and_extras_ignored() {
        let record = Record::from_row(&regency_schema(), &row(&["1101", "", "Kab. Simeulue", "extra"]));

        assert_eq!(record.get("province_id"), None);
        assert_eq!(record.fields().len(), 3);
    }

    #[test]
    fn test_serializes_in_schema_order() {
        let record = Record::from_row(&regency_schema(), &row(&["1101", "11"]));
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(json, r#"{"id":"1101","province_id":"11","name":null}"#);
    }
}

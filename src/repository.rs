// Repository - reads the CSV source tables once and answers lookups by parent id

use crate::config::normalize_path;
use crate::entities::{EntityKind, Record, TableSchema};
use crate::error::{Result, WilayahError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// One parsed CSV line, fields in source order
pub type RawRow = Vec<String>;

/// Row predicate applied after the cache lookup
pub type RowFilter<'a> = &'a dyn Fn(&[String]) -> bool;

pub struct Repository {
    data_dir: PathBuf,
    schemas: HashMap<EntityKind, TableSchema>,
    /// Unfiltered rows per source file name, filled on first access
    cache: RwLock<HashMap<String, Arc<Vec<RawRow>>>>,
}

impl Repository {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let schemas = EntityKind::ALL
            .iter()
            .map(|kind| kind.schema().map(|schema| (*kind, schema)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Repository {
            data_dir: normalize_path(data_dir.as_ref()),
            schemas,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Rows of `file_name`, optionally filtered.
    ///
    /// The file is parsed on the first call only. Later calls reuse the
    /// cached rows whatever the file on disk now contains.
    pub fn read_table(&self, file_name: &str, filter: Option<RowFilter>) -> Result<Vec<RawRow>> {
        let rows = self.cached_rows(file_name)?;

        Ok(match filter {
            Some(keep) => rows.iter().filter(|row| keep(row.as_slice())).cloned().collect(),
            None => rows.as_ref().clone(),
        })
    }

    /// `read_table`, then each row projected through `schema`
    pub fn map_table(&self, schema: &TableSchema, filter: Option<RowFilter>) -> Result<Vec<Record>> {
        let rows = self.read_table(schema.file_name(), filter)?;
        Ok(rows.iter().map(|row| Record::from_row(schema, row)).collect())
    }

    /// Records of `kind` whose parent-key column equals `parent_id` exactly.
    /// For the root level `parent_id` is ignored and every row is returned.
    pub fn children_of(&self, kind: EntityKind, parent_id: Option<&str>) -> Result<Vec<Record>> {
        let schema = self.schema(kind)?;

        match kind.parent_position() {
            None => self.map_table(schema, None),
            Some(position) => {
                let matches_parent = |row: &[String]| match parent_id {
                    Some(id) => row.get(position).map(String::as_str) == Some(id),
                    None => false,
                };
                self.map_table(schema, Some(&matches_parent))
            }
        }
    }

    pub fn get_provinces(&self) -> Result<Vec<Record>> {
        self.children_of(EntityKind::Province, None)
    }

    pub fn get_regencies_by_province_id(&self, province_id: &str) -> Result<Vec<Record>> {
        self.children_of(EntityKind::Regency, Some(province_id))
    }

    pub fn get_districts_by_regency_id(&self, regency_id: &str) -> Result<Vec<Record>> {
        self.children_of(EntityKind::District, Some(regency_id))
    }

    pub fn get_villages_by_district_id(&self, district_id: &str) -> Result<Vec<Record>> {
        self.children_of(EntityKind::Village, Some(district_id))
    }

    fn schema(&self, kind: EntityKind) -> Result<&TableSchema> {
        self.schemas
            .get(&kind)
            .ok_or_else(|| WilayahError::InvalidSchema(format!("no schema for {:?}", kind)))
    }

    fn cached_rows(&self, file_name: &str) -> Result<Arc<Vec<RawRow>>> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(rows) = cache.get(file_name) {
                return Ok(Arc::clone(rows));
            }
        }

        let rows = Arc::new(load_rows(&self.data_dir.join(file_name), file_name)?);
        debug!(file = file_name, rows = rows.len(), "cached source table");

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        // First writer wins so every caller sees the same parse
        let entry = cache.entry(file_name.to_string()).or_insert(rows);
        Ok(Arc::clone(entry))
    }
}

/// Parse a headerless CSV file. Empty lines are skipped, rows keep
/// whatever number of fields they have.
fn load_rows(path: &Path, file_name: &str) -> Result<Vec<RawRow>> {
    let content = fs::read(path).map_err(|source| WilayahError::SourceNotFound {
        file: file_name.to_string(),
        source,
    })?;

    // The reader closes an open quote at end of input instead of failing,
    // which would swallow every following line into one field
    if content.iter().filter(|b| **b == b'"').count() % 2 == 1 {
        return Err(WilayahError::UnterminatedQuote {
            file: file_name.to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| csv_error(file_name, err))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(rows)
}

fn csv_error(file_name: &str, err: csv::Error) -> WilayahError {
    if err.is_io_error() {
        return WilayahError::SourceNotFound {
            file: file_name.to_string(),
            source: err.into(),
        };
    }
    WilayahError::SourceParse {
        file: file_name.to_string(),
        source: err,
    }
}

// Entity Models - administrative divisions of Indonesia
//
// Province → Regency → District → Village, each level linked to its
// parent by a foreign-key id in column 1 of its table.

pub mod record;
pub mod schema;

pub use record::Record;
pub use schema::{Column, TableSchema};

use crate::error::Result;

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Province,
    Regency,
    District,
    Village,
}

impl EntityKind {
    /// Top-down order of the hierarchy
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Province,
        EntityKind::Regency,
        EntityKind::District,
        EntityKind::Village,
    ];

    /// Source table in the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Province => "provinces.csv",
            EntityKind::Regency => "regencies.csv",
            EntityKind::District => "districts.csv",
            EntityKind::Village => "villages.csv",
        }
    }

    /// Field names in column order
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Province => &["id", "name"],
            EntityKind::Regency => &["id", "province_id", "name"],
            EntityKind::District => &["id", "regency_id", "name"],
            EntityKind::Village => &["id", "district_id", "name"],
        }
    }

    /// Column holding the parent id, `None` for the root level
    pub fn parent_position(&self) -> Option<usize> {
        match self {
            EntityKind::Province => None,
            _ => Some(1),
        }
    }

    pub fn child(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Province => Some(EntityKind::Regency),
            EntityKind::Regency => Some(EntityKind::District),
            EntityKind::District => Some(EntityKind::Village),
            EntityKind::Village => None,
        }
    }

    /// Directory of one-file-per-entity artifacts
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Province => "province",
            EntityKind::Regency => "regency",
            EntityKind::District => "district",
            EntityKind::Village => "village",
        }
    }

    /// Directory of parent-scoped listings (`provinces` is a single root file)
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Province => "provinces",
            EntityKind::Regency => "regencies",
            EntityKind::District => "districts",
            EntityKind::Village => "villages",
        }
    }

    /// Relative path of the artifact for a single entity
    pub fn entity_path(&self, id: Option<&str>) -> String {
        format!("{}/{}.json", self.singular(), id.unwrap_or("null"))
    }

    /// Relative path of a listing: the root file for provinces, one file per
    /// parent id for every other level
    pub fn listing_path(&self, parent_id: Option<&str>) -> String {
        match self {
            EntityKind::Province => format!("{}.json", self.plural()),
            _ => format!("{}/{}.json", self.plural(), parent_id.unwrap_or("null")),
        }
    }

    /// Positional schema for this kind's table
    pub fn schema(&self) -> Result<TableSchema> {
        TableSchema::positional(self.file_name(), self.field_names())
    }
}

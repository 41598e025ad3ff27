// Generator - walks the hierarchy and writes the static JSON API tree
//
// Layout under the output directory:
//   provinces.json               all provinces
//   province/{id}.json           one province
//   regencies/{province_id}.json regencies of that province
//   regency/{id}.json            ...and so on down to village/{id}.json

use crate::config::normalize_path;
use crate::entities::{EntityKind, Record};
use crate::error::{Result, WilayahError};
use crate::repository::Repository;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Artifact counts for one `generate()` run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub provinces: usize,
    pub regencies: usize,
    pub districts: usize,
    pub villages: usize,
    /// `provinces.json` plus one listing per province, regency and district
    pub listings: usize,
}

impl GenerationReport {
    pub fn artifacts(&self) -> usize {
        self.provinces + self.regencies + self.districts + self.villages + self.listings
    }

    fn count_entity(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Province => self.provinces += 1,
            EntityKind::Regency => self.regencies += 1,
            EntityKind::District => self.districts += 1,
            EntityKind::Village => self.villages += 1,
        }
    }
}

pub struct Generator {
    repository: Repository,
    output_dir: PathBuf,
}

impl Generator {
    pub fn new(repository: Repository, output_dir: impl AsRef<Path>) -> Self {
        Generator {
            repository,
            output_dir: normalize_path(output_dir.as_ref()),
        }
    }

    /// Clear the output directory, then regenerate everything
    pub fn run(&self) -> Result<GenerationReport> {
        info!(dir = %self.output_dir.display(), "Clearing output directory...");
        self.clear_output_dir()?;

        info!("Generating API endpoints...");
        let report = self.generate()?;
        info!(artifacts = report.artifacts(), "API generation complete!");

        Ok(report)
    }

    /// Empty the output directory, keeping the directory itself.
    ///
    /// A missing directory is created. If anything inside cannot be removed
    /// the failure is logged and the directory is (re)created so generation
    /// can still proceed. Not atomic: a crash midway leaves it half cleared.
    pub fn clear_output_dir(&self) -> Result<()> {
        self.clear_with(remove_entry)
    }

    fn clear_with<F>(&self, remove: F) -> Result<()>
    where
        F: Fn(&Path) -> Result<()>,
    {
        if !self.output_dir.is_dir() {
            return self.create_output_dir();
        }

        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(source) => {
                warn!(dir = %self.output_dir.display(), error = %source, "cannot list output directory");
                return self.create_output_dir();
            }
        };

        let mut failed = false;
        for entry in entries {
            let outcome = entry
                .map_err(|source| WilayahError::Removal {
                    path: self.output_dir.clone(),
                    source,
                })
                .and_then(|entry| remove(&entry.path()));

            if let Err(err) = outcome {
                warn!(error = %err, "output directory not fully cleared");
                failed = true;
            }
        }

        if failed {
            self.create_output_dir()?;
        }
        Ok(())
    }

    /// Depth-first walk: provinces in source order, each followed by its
    /// regencies, their districts and villages. Stops at the first failure;
    /// files already written stay on disk.
    pub fn generate(&self) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        let provinces = self.repository.get_provinces()?;
        self.write_artifact(&EntityKind::Province.listing_path(None), &provinces)?;
        report.listings += 1;

        self.walk(EntityKind::Province, &provinces, &mut report)?;
        Ok(report)
    }

    fn walk(&self, kind: EntityKind, records: &[Record], report: &mut GenerationReport) -> Result<()> {
        for record in records {
            let children = match kind.child() {
                Some(child) => {
                    let children = self.repository.children_of(child, record.id())?;
                    self.write_artifact(&child.listing_path(record.id()), &children)?;
                    report.listings += 1;
                    Some((child, children))
                }
                None => None,
            };

            self.write_artifact(&kind.entity_path(record.id()), record)?;
            report.count_entity(kind);

            if let Some((child, children)) = children {
                self.walk(child, &children, report)?;
            }
        }
        Ok(())
    }

    /// Write `payload` as 2-space pretty JSON to `relative` under the output
    /// directory, creating parent directories first. Existing files are
    /// overwritten. Paths that would leave the output directory (an id
    /// like `../x`) are refused.
    pub fn write_artifact<T: Serialize + ?Sized>(&self, relative: &str, payload: &T) -> Result<PathBuf> {
        let relative = relative.trim_start_matches('/');
        let inside = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !inside {
            return Err(WilayahError::UnsafeArtifactPath(relative.to_string()));
        }

        let path = self.output_dir.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WilayahError::OutputWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(payload).map_err(|source| WilayahError::Serialize {
            path: path.clone(),
            source,
        })?;

        fs::write(&path, json).map_err(|source| WilayahError::OutputWrite {
            path: path.clone(),
            source,
        })?;

        info!("+ /{}", relative);
        Ok(path)
    }

    fn create_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| WilayahError::OutputWrite {
            path: self.output_dir.clone(),
            source,
        })
    }
}

/// Files are unlinked, directories removed with their contents
pub fn remove_entry(path: &Path) -> Result<()> {
    let removal = |source| WilayahError::Removal {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::symlink_metadata(path).map_err(removal)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(removal)
    } else {
        fs::remove_file(path).map_err(removal)
    }
}

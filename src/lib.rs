// Wilayah API - Core Library
// CSV tables of Indonesian administrative divisions → static JSON API tree

pub mod config;
pub mod entities;
pub mod error;
pub mod generator;
pub mod repository;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::{normalize_path, Config};
pub use entities::{Column, EntityKind, Record, TableSchema};
pub use error::{Result, WilayahError};
pub use generator::{remove_entry, GenerationReport, Generator};
pub use repository::{RawRow, Repository, RowFilter};
#[cfg(feature = "server")]
pub use server::build_router;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a generator from `config` and run it: clear the output directory,
/// then regenerate every artifact.
pub fn generate_api(config: &Config) -> Result<GenerationReport> {
    let repository = Repository::new(&config.data_dir)?;
    Generator::new(repository, &config.output_dir).run()
}

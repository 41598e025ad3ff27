// Process configuration - port, data directory, output directory, URL prefix

use std::env;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "static/api";
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment
    ///
    /// * `PORT` - listen port (default 3000)
    /// * `WILAYAH_DATA_DIR` - directory holding the four CSV tables
    /// * `WILAYAH_OUTPUT_DIR` - root of the generated JSON tree
    /// * `WILAYAH_API_PREFIX` - URL prefix the tree is served under
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading keys through `lookup`.
    /// Unparsable or empty values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = non_empty("WILAYAH_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let output_dir =
            non_empty("WILAYAH_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
        let api_prefix = non_empty("WILAYAH_API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

        Config {
            port,
            data_dir: normalize_path(Path::new(&data_dir)),
            output_dir: normalize_path(Path::new(&output_dir)),
            api_prefix,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// "/api/", "api" and "/api" all become "/api"
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{}", trimmed)
}

/// Lexical path cleanup: drops `.` and folds `..` into the preceding
/// component. Never touches the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // "/.." is still "/"
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("WILAYAH_DATA_DIR", "./fixtures/../data"),
            ("WILAYAH_OUTPUT_DIR", "/srv/www/./api"),
            ("WILAYAH_API_PREFIX", "v1/"),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/www/api"));
        assert_eq!(config.api_prefix, "/v1");
    }

    #[test]
    fn test_bad_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);

        let config = Config::from_lookup(lookup_from(&[("PORT", "70000")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../data")), PathBuf::from("../data"));
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }
}

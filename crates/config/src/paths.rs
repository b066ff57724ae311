// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use path_clean::clean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "cipherstat.config.yaml";
pub const DEFAULT_DB_NAME: &str = "db";
pub const PROJECT_ROOT_DIR: &str = ".cipherstat";

/// Inputs for working out where a node keeps its files
#[derive(Debug, Clone)]
pub struct PathInputs<'a> {
    pub name: &'a str,
    pub default_data_dir: &'a Path,
    pub default_config_dir: &'a Path,
    /// Config file that was actually loaded
    pub loaded_config: Option<&'a Path>,
    pub data_dir: Option<&'a Path>,
    /// Absolute, or relative to `<data_dir>/<name>`
    pub db_file: Option<&'a Path>,
}

/// Resolved locations. A project config found on disk keeps its data in
/// `.cipherstat/data` beside it; otherwise the OS data dir is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub db_file: PathBuf,
}

impl NodePaths {
    pub fn resolve(inputs: PathInputs<'_>) -> Self {
        let config_file = match inputs.loaded_config {
            Some(file) => clean(file),
            None => clean(inputs.default_config_dir.join(DEFAULT_CONFIG_NAME)),
        };

        let project_data = inputs
            .loaded_config
            .and_then(Path::parent)
            .map(|dir| dir.join(PROJECT_ROOT_DIR).join("data"));

        let data_dir = inputs
            .data_dir
            .map(Path::to_path_buf)
            .or(project_data)
            .unwrap_or_else(|| inputs.default_data_dir.to_path_buf());

        let node_dir = data_dir.join(inputs.name);
        let db_file = match inputs.db_file {
            Some(file) if file.is_absolute() => clean(file),
            Some(file) => clean(node_dir.join(file)),
            None => clean(node_dir.join(DEFAULT_DB_NAME)),
        };

        Self {
            config_file,
            data_dir: clean(data_dir),
            db_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        loaded: Option<&str>,
        data_dir: Option<&str>,
        db_file: Option<&str>,
    ) -> (String, String) {
        let paths = NodePaths::resolve(PathInputs {
            name: "default",
            default_data_dir: Path::new("/home/user/.local/share/cipherstat"),
            default_config_dir: Path::new("/home/user/.config/cipherstat"),
            loaded_config: loaded.map(Path::new),
            data_dir: data_dir.map(Path::new),
            db_file: db_file.map(Path::new),
        });
        (
            paths.config_file.display().to_string(),
            paths.db_file.display().to_string(),
        )
    }

    #[test]
    fn os_defaults() {
        assert_eq!(
            resolve(None, None, None),
            (
                "/home/user/.config/cipherstat/cipherstat.config.yaml".into(),
                "/home/user/.local/share/cipherstat/default/db".into()
            )
        );
    }

    #[test]
    fn project_config_keeps_data_beside_it() {
        assert_eq!(
            resolve(Some("/proj/cipherstat.config.yaml"), None, None).1,
            "/proj/.cipherstat/data/default/db"
        );
    }

    #[test]
    fn overrides() {
        assert_eq!(
            resolve(Some("/proj/c.yaml"), Some("/srv/data"), None).1,
            "/srv/data/default/db"
        );
        assert_eq!(
            resolve(None, Some("/srv/data"), Some("/var/stats.db")).1,
            "/var/stats.db"
        );
        assert_eq!(
            resolve(None, Some("/srv/data"), Some("../../stats")).1,
            "/srv/stats"
        );
    }
}

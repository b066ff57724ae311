// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use path_clean::clean;
use std::path::{Path, PathBuf};

/// Where the configuration file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Passed with `--config`. Must exist.
    Explicit(PathBuf),
    /// Found in the cwd or one of its ancestors
    Discovered(PathBuf),
    /// The OS config dir. Missing is fine and means defaults.
    Fallback(PathBuf),
}

impl ConfigLocation {
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Discovered(p) | Self::Fallback(p) => p,
        }
    }

    /// The file to load, or `None` when the defaults should be used
    pub fn file_to_load(&self) -> Option<&Path> {
        match self {
            Self::Fallback(p) if !p.exists() => None,
            other => Some(other.path()),
        }
    }
}

/// Closest `filename` walking up from `start`
pub fn find_upwards(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

pub fn locate_config(
    cwd: &Path,
    config_dir: &Path,
    filename: &str,
    cli_file: Option<&Path>,
) -> ConfigLocation {
    locate_with(find_upwards, cwd, config_dir, filename, cli_file)
}

fn locate_with(
    search: impl Fn(&Path, &str) -> Option<PathBuf>,
    cwd: &Path,
    config_dir: &Path,
    filename: &str,
    cli_file: Option<&Path>,
) -> ConfigLocation {
    if let Some(file) = cli_file {
        return ConfigLocation::Explicit(clean(cwd.join(file)));
    }
    match search(cwd, filename) {
        Some(found) => ConfigLocation::Discovered(found),
        None => ConfigLocation::Fallback(clean(config_dir.join(filename))),
    }
}

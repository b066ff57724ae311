// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::locate::locate_config;
use crate::paths::{NodePaths, PathInputs, DEFAULT_CONFIG_NAME};
use crate::yaml::load_yaml_with_env;
use anyhow::{anyhow, bail, Context, Result};
use figment::{
    providers::{Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

/// Threshold used when the configuration does not set one
pub const DEFAULT_THRESHOLD: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregationConfig {
    /// The running sum is compared against this value after every submission
    pub threshold: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Shape of the yaml file. Every field is optional.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnscopedAppConfig {
    /// Node name used in logs and as the folder for the db
    name: String,
    /// Defaults to `~/.local/share/cipherstat` on linux
    data_dir: Option<PathBuf>,
    db_file: Option<PathBuf>,
    /// Keep all state in memory
    in_mem_store: bool,
    aggregation: AggregationConfig,
}

impl Default for UnscopedAppConfig {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            data_dir: None,
            db_file: None,
            in_mem_store: false,
            aggregation: AggregationConfig::default(),
        }
    }
}

impl UnscopedAppConfig {
    /// Resolve paths against the OS directories
    pub fn into_scoped(self, loaded_config: Option<&Path>) -> Result<AppConfig> {
        self.into_scoped_with_defaults(&OsDirs::data_dir()?, &OsDirs::config_dir()?, loaded_config)
    }

    pub fn into_scoped_with_defaults(
        self,
        default_data_dir: &Path,
        default_config_dir: &Path,
        loaded_config: Option<&Path>,
    ) -> Result<AppConfig> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            bail!("The node name must not be empty.");
        }

        let paths = NodePaths::resolve(PathInputs {
            name: &name,
            default_data_dir,
            default_config_dir,
            loaded_config,
            data_dir: self.data_dir.as_deref(),
            db_file: self.db_file.as_deref(),
        });

        Ok(AppConfig {
            name,
            paths,
            in_mem_store: self.in_mem_store,
            aggregation: self.aggregation,
        })
    }
}

/// Configuration with every path resolved
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    name: String,
    paths: NodePaths,
    in_mem_store: bool,
    aggregation: AggregationConfig,
}

impl AppConfig {
    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn db_file(&self) -> PathBuf {
        self.paths.db_file.clone()
    }

    pub fn config_file(&self) -> PathBuf {
        self.paths.config_file.clone()
    }

    pub fn use_in_mem_store(&self) -> bool {
        self.in_mem_store
    }

    pub fn threshold(&self) -> u64 {
        self.aggregation.threshold
    }
}

/// Load the config named on the command line, or search for one from the cwd upwards and then
/// in the OS config dir. A named file must exist. Anything else missing means defaults.
pub fn load_config(config_file: Option<String>) -> Result<AppConfig> {
    let cli_file = config_file.map(PathBuf::from);
    let location = locate_config(
        &env::current_dir()?,
        &OsDirs::config_dir()?,
        DEFAULT_CONFIG_NAME,
        cli_file.as_deref(),
    );

    let loaded = location.file_to_load();
    let yaml = match loaded {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_yaml_with_env(path).context("Configuration file not found")?
        }
        None => {
            info!("No configuration file found, using defaults");
            String::new()
        }
    };

    let unscoped: UnscopedAppConfig =
        Figment::from(Serialized::defaults(UnscopedAppConfig::default()))
            .merge(Yaml::string(&yaml))
            .extract()
            .context("Could not parse configuration")?;

    unscoped.into_scoped(loaded)
}

pub struct OsDirs;

impl OsDirs {
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("cipherstat"))
            .ok_or_else(|| anyhow!("No OS config directory available"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join("cipherstat"))
            .ok_or_else(|| anyhow!("No OS data directory available"))
    }
}

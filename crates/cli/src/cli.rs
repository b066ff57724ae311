// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::telemetry::setup_tracing;
use crate::{config, replay};
use anyhow::Result;
use cipherstat_config::{load_config, AppConfig};
use clap::{command, ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "cipherstat")]
#[command(about = "Running encrypted statistics over opaque ciphertext handles", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity: `-v` info, `-vv` debug, `-vvv` trace. Warnings only by default.
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        const LEVELS: [Level; 4] = [Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
        if self.quiet {
            return Level::ERROR;
        }
        LEVELS[usize::from(self.verbose).min(LEVELS.len() - 1)]
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        setup_tracing(self.log_level());

        let config = self.load_config()?;
        info!("Config loaded from: {:?}", config.config_file());

        match self.command {
            Commands::Replay { script, seed } => replay::execute(&config, &script, seed).await?,
            Commands::Config => config::execute(&config)?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        load_config(self.config.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a submission script against an in memory node using the mock coprocessor and print
    /// the decrypted aggregate
    Replay {
        /// Path to the script yaml
        script: PathBuf,

        /// Seed for the coprocessor rng. A random seed is used when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the resolved configuration
    Config,
}

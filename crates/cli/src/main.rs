// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod cli;
mod config;
mod replay;
mod telemetry;

use clap::Parser;
use std::process::ExitCode;

#[actix::main]
async fn main() -> ExitCode {
    match cli::Cli::parse().execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cipherstat: {err:#}");
            ExitCode::FAILURE
        }
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Logs go to stderr so stdout stays a clean YAML report
pub fn setup_tracing(level: Level) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(LevelFilter::from_level(level))
        .init();
}

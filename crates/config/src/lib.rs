// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod app_config;
mod locate;
mod paths;
mod store_keys;
mod yaml;

pub use app_config::*;
pub use locate::{find_upwards, locate_config, ConfigLocation};
pub use paths::{NodePaths, DEFAULT_CONFIG_NAME, DEFAULT_DB_NAME};
pub use store_keys::*;

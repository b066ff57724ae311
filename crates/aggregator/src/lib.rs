// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod aggregator;
mod audit;
mod clock;
mod error;
mod ledger;
mod repo;
mod stats;

pub use aggregator::*;
pub use audit::*;
pub use clock::*;
pub use error::*;
pub use ledger::*;
pub use repo::*;
pub use stats::*;

pub use cipherstat_config::DEFAULT_THRESHOLD;

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod faulty_algebra;
mod node_history;
mod test_node;
mod tracing;

pub use faulty_algebra::*;
pub use node_history::*;
pub use test_node::*;
pub use tracing::*;

pub use cipherstat_utils::{create_shared_rng, create_shared_rng_from_u64};

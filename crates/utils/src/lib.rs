// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Small shared pieces: byte blobs, log formatting and the seedable rng.

mod formatters;
mod rng;
mod utility_types;

pub use alloy_primitives::U256;
pub use formatters::{hexf, short_hex};
pub use rng::{create_shared_rng, create_shared_rng_from_u64, SharedRng};
pub use utility_types::ArcBytes;

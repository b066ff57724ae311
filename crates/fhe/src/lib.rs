// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod algebra;
mod cipher;
mod error;
mod mock;

pub use algebra::*;
pub use cipher::*;
pub use error::*;
pub use mock::*;

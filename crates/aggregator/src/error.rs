// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_fhe::AlgebraError;
use cipherstat_utils::U256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    /// No proof, or only an empty one, is stored for the id
    #[error("No audit proof stored for submission {0}")]
    ProofNotFound(U256),

    #[error("Ciphertext adapter failed: {0}")]
    Adapter(#[from] AlgebraError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

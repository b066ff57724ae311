// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::Handle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("Unknown ciphertext handle {0}")]
    UnknownHandle(Handle),

    #[error("Ciphertext handle is uninitialized")]
    Uninitialized,

    #[error("Ciphertext {handle} holds a {found} where a {expected} was expected")]
    TypeMismatch {
        handle: Handle,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Malformed proof: expected {expected} bytes, got {actual}")]
    MalformedProof { expected: usize, actual: usize },

    #[error("Coprocessor state is unavailable: {0}")]
    Unavailable(String),
}

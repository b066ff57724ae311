// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_utils::short_hex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HANDLE_LEN: usize = 32;

/// Reference to a ciphertext held by the coprocessor. The all-zero handle never refers to a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle([u8; HANDLE_LEN]);

impl Handle {
    pub const ZERO: Handle = Handle([0u8; HANDLE_LEN]);

    pub fn new(bytes: [u8; HANDLE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HANDLE_LEN]
    }

    pub fn as_bytes(&self) -> &[u8; HANDLE_LEN] {
        &self.0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", short_hex(&self.0))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", short_hex(&self.0))
    }
}

/// Opaque encrypted integer. Only a [`crate::CipherAlgebra`] can operate on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cipher(Handle);

impl Cipher {
    /// The "never touched" sentinel. Distinct from any encoding of zero.
    pub fn uninitialized() -> Self {
        Self(Handle::ZERO)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self(handle)
    }

    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cipher({})", self.0)
    }
}

/// Opaque encrypted boolean.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EncBool(Handle);

impl EncBool {
    pub fn uninitialized() -> Self {
        Self(Handle::ZERO)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self(handle)
    }

    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl fmt::Debug for EncBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncBool({})", self.0)
    }
}

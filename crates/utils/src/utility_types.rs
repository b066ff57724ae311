// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::formatters::hexf;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref, sync::Arc};

/// Immutable byte blob that clones by reference count. Serializes exactly like `Vec<u8>`.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct ArcBytes(Arc<[u8]>);

impl ArcBytes {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Owned copy of the bytes
    pub fn extract_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Deref for ArcBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ArcBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for ArcBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl From<ArcBytes> for Vec<u8> {
    fn from(bytes: ArcBytes) -> Self {
        bytes.extract_bytes()
    }
}

impl fmt::Debug for ArcBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hexf(self, f)
    }
}

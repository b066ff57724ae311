// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Sha256 over the bincode encoding of an event payload. Equal payloads give equal ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub [u8; 32]);

impl EventId {
    pub fn hash<T: Serialize>(payload: &T) -> Self {
        let mut hasher = Sha256::new();
        // A hasher sink never fails
        let _ = bincode::serialize_into(&mut hasher, payload);
        EventId(hasher.finalize().into())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bs58::encode(self.0).into_string();
        write!(f, "evt:{}", encoded.get(..8).unwrap_or(&encoded))
    }
}

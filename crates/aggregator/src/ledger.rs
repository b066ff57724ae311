// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_fhe::Cipher;
use cipherstat_utils::U256;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSubmission {
    pub id: U256,
    pub value: Cipher,
    pub timestamp: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSubmission {
    pub id: U256,
    pub choice: Cipher,
    pub timestamp: U256,
}

/// Number of submissions recorded so far for each kind. The last assigned id equals the count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerCounters {
    pub data: U256,
    pub votes: U256,
}

impl LedgerCounters {
    pub fn next_data(&mut self) -> U256 {
        self.data += U256::from(1);
        self.data
    }

    pub fn next_vote(&mut self) -> U256 {
        self.votes += U256::from(1);
        self.votes
    }
}

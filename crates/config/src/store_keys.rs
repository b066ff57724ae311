// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_utils::U256;

pub struct StoreKeys;

impl StoreKeys {
    pub fn engine() -> String {
        String::from("//stats/engine")
    }

    pub fn data_submission(id: &U256) -> String {
        format!("//ledger/data/{id}")
    }

    pub fn vote_submission(id: &U256) -> String {
        format!("//ledger/votes/{id}")
    }

    pub fn audit_proof(data_id: &U256) -> String {
        format!("//audit/{data_id}")
    }
}

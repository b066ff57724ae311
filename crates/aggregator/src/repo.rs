// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{DataSubmission, EngineState, VoteSubmission};
use cipherstat_config::StoreKeys;
use cipherstat_data::{Repositories, Repository};
use cipherstat_utils::{ArcBytes, U256};

pub trait EngineRepositoryFactory {
    fn engine(&self) -> Repository<EngineState>;
}

impl EngineRepositoryFactory for Repositories {
    fn engine(&self) -> Repository<EngineState> {
        self.at(StoreKeys::engine())
    }
}

pub trait LedgerRepositoryFactory {
    fn data_submission(&self, id: &U256) -> Repository<DataSubmission>;
    fn vote_submission(&self, id: &U256) -> Repository<VoteSubmission>;
}

impl LedgerRepositoryFactory for Repositories {
    fn data_submission(&self, id: &U256) -> Repository<DataSubmission> {
        self.at(StoreKeys::data_submission(id))
    }

    fn vote_submission(&self, id: &U256) -> Repository<VoteSubmission> {
        self.at(StoreKeys::vote_submission(id))
    }
}

/// Proofs are keyed by data id but nothing ties them to an existing submission
pub trait AuditRepositoryFactory {
    fn audit_proof(&self, data_id: &U256) -> Repository<ArcBytes>;
}

impl AuditRepositoryFactory for Repositories {
    fn audit_proof(&self, data_id: &U256) -> Repository<ArcBytes> {
        self.at(StoreKeys::audit_proof(data_id))
    }
}

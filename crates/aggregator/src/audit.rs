// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{AuditRepositoryFactory, StatsError};
use actix::prelude::*;
use cipherstat_data::{DataStore, Repositories, RepositoriesFactory};
use cipherstat_events::{AuditVerified, EventBus, StatsEvent};
use cipherstat_fhe::SharedAlgebra;
use cipherstat_utils::{ArcBytes, U256};
use tracing::{debug, info};

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct SubmitProof {
    pub data_id: U256,
    pub proof: ArcBytes,
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<bool, StatsError>")]
pub struct VerifyProof {
    pub data_id: U256,
    pub cleartexts: ArcBytes,
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<ArcBytes, StatsError>")]
pub struct GetAuditProof(pub U256);

/// Stores one proof per id and checks claimed cleartexts against it through the adapter.
/// Ids are not checked against the ledger.
pub struct AuditRegistry {
    algebra: SharedAlgebra,
    bus: Addr<EventBus<StatsEvent>>,
    repositories: Repositories,
}

impl Actor for AuditRegistry {
    type Context = Context<Self>;
}

impl AuditRegistry {
    pub fn new(algebra: SharedAlgebra, bus: &Addr<EventBus<StatsEvent>>, store: &DataStore) -> Self {
        Self {
            algebra,
            bus: bus.clone(),
            repositories: store.repositories(),
        }
    }

    pub fn attach(
        algebra: SharedAlgebra,
        bus: &Addr<EventBus<StatsEvent>>,
        store: &DataStore,
    ) -> Addr<Self> {
        info!("AuditRegistry attached");
        AuditRegistry::new(algebra, bus, store).start()
    }
}

impl Handler<SubmitProof> for AuditRegistry {
    type Result = ();

    fn handle(&mut self, msg: SubmitProof, _: &mut Self::Context) -> Self::Result {
        debug!(data_id = %msg.data_id, len = msg.proof.len(), "storing audit proof");
        self.repositories
            .audit_proof(&msg.data_id)
            .write(&msg.proof);
        self.bus.do_send(StatsEvent::from(AuditVerified {
            data_id: msg.data_id,
        }));
    }
}

impl Handler<VerifyProof> for AuditRegistry {
    type Result = ResponseFuture<Result<bool, StatsError>>;

    fn handle(&mut self, msg: VerifyProof, _: &mut Self::Context) -> Self::Result {
        let repo = self.repositories.audit_proof(&msg.data_id);
        let algebra = self.algebra.clone();
        Box::pin(async move {
            let proof = repo.read().await?.unwrap_or_default();
            if proof.is_empty() {
                return Err(StatsError::ProofNotFound(msg.data_id));
            }
            Ok(algebra.verify(msg.data_id, &msg.cleartexts, &proof)?)
        })
    }
}

impl Handler<GetAuditProof> for AuditRegistry {
    type Result = ResponseFuture<Result<ArcBytes, StatsError>>;

    fn handle(&mut self, msg: GetAuditProof, _: &mut Self::Context) -> Self::Result {
        let repo = self.repositories.audit_proof(&msg.0);
        Box::pin(async move { Ok(repo.read().await?.unwrap_or_default()) })
    }
}

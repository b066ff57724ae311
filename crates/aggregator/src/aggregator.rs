// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    apply_ciphertext, DataSubmission, EncryptedStats, EngineRepositoryFactory, LedgerCounters,
    LedgerRepositoryFactory, SharedClock, StatsError, VoteSubmission,
};
use actix::prelude::*;
use anyhow::Result;
use cipherstat_data::{DataStore, Persistable, Repositories, RepositoriesFactory, WriteBatch};
use cipherstat_events::{DataSubmitted, EventBus, StatsEvent, StatsUpdated, VoteSubmitted};
use cipherstat_fhe::{Cipher, SharedAlgebra};
use cipherstat_utils::U256;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Everything the engine must commit together for each submission
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub counters: LedgerCounters,
    pub stats: EncryptedStats,
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<U256, StatsError>")]
pub struct SubmitData {
    pub value: Cipher,
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<U256, StatsError>")]
pub struct SubmitVote {
    pub choice: Cipher,
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "EncryptedStats")]
pub struct GetStats;

#[derive(Message, Clone, Debug)]
#[rtype(result = "LedgerCounters")]
pub struct GetCounters;

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Option<DataSubmission>, StatsError>")]
pub struct GetDataSubmission(pub U256);

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Option<VoteSubmission>, StatsError>")]
pub struct GetVoteSubmission(pub U256);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmissionKind {
    Data,
    Vote,
}

/// A submission that is ready to commit
struct Staged {
    id: U256,
    state: EngineState,
    batch: WriteBatch,
    event: StatsEvent,
}

type SubmitResponse = AtomicResponse<StatsAggregator, Result<U256, StatsError>>;

pub struct StatsAggregatorParams {
    pub algebra: SharedAlgebra,
    pub clock: SharedClock,
    pub bus: Addr<EventBus<StatsEvent>>,
    pub store: DataStore,
    pub threshold: u64,
}

/// Submission ledger and aggregation engine. The actor mailbox is the single serialization
/// point. A submission assigns its id and folds the ciphertext, then commits the engine state
/// and its ledger record in one batch before the next message is handled.
pub struct StatsAggregator {
    algebra: SharedAlgebra,
    clock: SharedClock,
    bus: Addr<EventBus<StatsEvent>>,
    repositories: Repositories,
    threshold: u64,
    state: Persistable<EngineState>,
}

impl Actor for StatsAggregator {
    type Context = Context<Self>;
}

impl StatsAggregator {
    pub fn new(params: StatsAggregatorParams, state: Persistable<EngineState>) -> Self {
        Self {
            algebra: params.algebra,
            clock: params.clock,
            bus: params.bus,
            repositories: params.store.repositories(),
            threshold: params.threshold,
            state,
        }
    }

    /// Load any persisted engine state and start the actor
    pub async fn attach(params: StatsAggregatorParams) -> Result<Addr<Self>> {
        let state = params
            .store
            .repositories()
            .engine()
            .load_or_default(EngineState::default())
            .await?;

        if let Some(existing) = state.get() {
            info!(
                data = %existing.counters.data,
                votes = %existing.counters.votes,
                threshold = params.threshold,
                "StatsAggregator attached"
            );
        }

        Ok(StatsAggregator::new(params, state).start())
    }

    /// Assign the id and fold the ciphertext into a batch holding the engine state and the
    /// ledger record. The actor state is left untouched.
    fn stage(&self, kind: SubmissionKind, value: Cipher) -> Result<Staged, StatsError> {
        let timestamp = self.clock.now();
        let mut batch = self.repositories.store().batch();
        let mut id = U256::ZERO;

        let algebra = &self.algebra;
        let threshold = self.threshold;
        let state = self.state.try_stage(&mut batch, |mut state: EngineState| {
            id = match kind {
                SubmissionKind::Data => state.counters.next_data(),
                SubmissionKind::Vote => state.counters.next_vote(),
            };
            state.stats = apply_ciphertext(algebra.as_ref(), &state.stats, &value, threshold)?;
            Ok::<_, StatsError>(state)
        })?;

        let event = match kind {
            SubmissionKind::Data => {
                batch.put(
                    &self.repositories.data_submission(&id),
                    &DataSubmission {
                        id,
                        value,
                        timestamp,
                    },
                )?;
                StatsEvent::from(DataSubmitted { id, timestamp })
            }
            SubmissionKind::Vote => {
                batch.put(
                    &self.repositories.vote_submission(&id),
                    &VoteSubmission {
                        id,
                        choice: value,
                        timestamp,
                    },
                )?;
                StatsEvent::from(VoteSubmitted { id, timestamp })
            }
        };

        Ok(Staged {
            id,
            state,
            batch,
            event,
        })
    }

    /// The mailbox stays blocked until the batch is committed so the next submission sees
    /// this one's state.
    fn submit(&mut self, kind: SubmissionKind, value: Cipher) -> SubmitResponse {
        let Staged {
            id,
            state,
            batch,
            event,
        } = match self.stage(kind, value) {
            Ok(staged) => staged,
            Err(err) => {
                warn!("{kind:?} submission rejected: {err}");
                return AtomicResponse::new(Box::pin(fut::ready(Err(err))));
            }
        };

        AtomicResponse::new(Box::pin(batch.commit().into_actor(self).map(
            move |res, act, _| {
                if let Err(err) = res {
                    warn!("{kind:?} submission {id} not stored: {err}");
                    return Err(StatsError::Store(err));
                }
                act.state.commit_staged(state);
                act.bus.do_send(StatsEvent::from(StatsUpdated));
                act.bus.do_send(event);
                Ok(id)
            },
        )))
    }

    fn current(&self) -> EngineState {
        self.state.get().unwrap_or_default()
    }
}

impl Handler<SubmitData> for StatsAggregator {
    type Result = SubmitResponse;

    fn handle(&mut self, msg: SubmitData, _: &mut Self::Context) -> Self::Result {
        self.submit(SubmissionKind::Data, msg.value)
    }
}

impl Handler<SubmitVote> for StatsAggregator {
    type Result = SubmitResponse;

    fn handle(&mut self, msg: SubmitVote, _: &mut Self::Context) -> Self::Result {
        self.submit(SubmissionKind::Vote, msg.choice)
    }
}

impl Handler<GetStats> for StatsAggregator {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _: GetStats, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.current().stats)
    }
}

impl Handler<GetCounters> for StatsAggregator {
    type Result = MessageResult<GetCounters>;

    fn handle(&mut self, _: GetCounters, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.current().counters)
    }
}

impl Handler<GetDataSubmission> for StatsAggregator {
    type Result = ResponseFuture<Result<Option<DataSubmission>, StatsError>>;

    fn handle(&mut self, msg: GetDataSubmission, _: &mut Self::Context) -> Self::Result {
        let repo = self.repositories.data_submission(&msg.0);
        Box::pin(async move { Ok(repo.read().await?) })
    }
}

impl Handler<GetVoteSubmission> for StatsAggregator {
    type Result = ResponseFuture<Result<Option<VoteSubmission>, StatsError>>;

    fn handle(&mut self, msg: GetVoteSubmission, _: &mut Self::Context) -> Self::Result {
        let repo = self.repositories.vote_submission(&msg.0);
        Box::pin(async move { Ok(repo.read().await?) })
    }
}

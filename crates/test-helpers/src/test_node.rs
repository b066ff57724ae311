// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use cipherstat_aggregator::{GetStats, ManualClock, StatsError, SubmitData, SubmitVote};
use cipherstat_fhe::Decryptor;
use cipherstat_node_builder::{StatsNodeBuilder, StatsNodeHandle};
use cipherstat_utils::{create_shared_rng_from_u64, U256};
use std::{ops::Deref, sync::Arc};

pub const TEST_START_TIME: u64 = 1_700_000_000;

/// Decrypted aggregate as a key holder would see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plain {
    pub count: u64,
    pub sum: u64,
    pub alert: bool,
}

/// In memory node with a history collector and a manual clock
pub struct TestNode {
    node: StatsNodeHandle,
    clock: ManualClock,
}

impl TestNode {
    pub async fn start(seed: u64) -> Result<Self> {
        Self::start_with(seed, |builder| builder).await
    }

    /// Start a node after letting the caller adjust the builder
    pub async fn start_with<F>(seed: u64, customize: F) -> Result<Self>
    where
        F: FnOnce(StatsNodeBuilder) -> StatsNodeBuilder,
    {
        let clock = ManualClock::new(TEST_START_TIME);
        let builder = StatsNodeBuilder::new(create_shared_rng_from_u64(seed))
            .with_name(&format!("test-node-{seed}"))
            .testmode_with_history()
            .with_clock(Arc::new(clock.clone()));
        let node = customize(builder).build().await?;
        Ok(Self { node, clock })
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub async fn try_data(&self, value: u64) -> Result<Result<U256, StatsError>> {
        let value = self.coprocessor().encrypt(value)?;
        Ok(self.aggregator().send(SubmitData { value }).await?)
    }

    pub async fn try_vote(&self, choice: u64) -> Result<Result<U256, StatsError>> {
        let choice = self.coprocessor().encrypt(choice)?;
        Ok(self.aggregator().send(SubmitVote { choice }).await?)
    }

    pub async fn data(&self, value: u64) -> Result<U256> {
        Ok(self.try_data(value).await??)
    }

    pub async fn vote(&self, choice: u64) -> Result<U256> {
        Ok(self.try_vote(choice).await??)
    }

    /// Decrypt the aggregate. `None` while nothing has been aggregated.
    pub async fn decrypted(&self) -> Result<Option<Plain>> {
        let stats = self.aggregator().send(GetStats).await?;
        if !stats.is_initialized(self.algebra.as_ref()) {
            return Ok(None);
        }
        let cop = self.coprocessor();
        Ok(Some(Plain {
            count: cop.decrypt(&stats.count)?,
            sum: cop.decrypt(&stats.sum)?,
            alert: cop.decrypt_bool(&stats.threshold_alert)?,
        }))
    }
}

impl Deref for TestNode {
    type Target = StatsNodeHandle;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

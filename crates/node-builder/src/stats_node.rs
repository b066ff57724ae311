// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use actix::Addr;
use anyhow::{anyhow, Result};
use cipherstat_aggregator::{AuditRegistry, StatsAggregator};
use cipherstat_data::{DataStore, InMemStore};
use cipherstat_events::{EventBus, HistoryCollector, Shutdown, StatsEvent};
use cipherstat_fhe::{MockCoprocessor, SharedAlgebra};
use std::sync::Arc;

/// A sharable handle to a running aggregation node
#[derive(Clone)]
pub struct StatsNodeHandle {
    pub name: String,
    pub store: DataStore,
    pub bus: Addr<EventBus<StatsEvent>>,
    pub algebra: SharedAlgebra,
    pub coprocessor: Arc<MockCoprocessor>,
    pub aggregator: Addr<StatsAggregator>,
    pub audit: Addr<AuditRegistry>,
    pub history: Option<Addr<HistoryCollector<StatsEvent>>>,
}

impl std::fmt::Debug for StatsNodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsNodeHandle")
            .field("name", &self.name)
            .field("store", &self.store)
            .field("history", &self.history.is_some())
            .finish()
    }
}

impl StatsNodeHandle {
    pub fn bus(&self) -> &Addr<EventBus<StatsEvent>> {
        &self.bus
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn aggregator(&self) -> &Addr<StatsAggregator> {
        &self.aggregator
    }

    pub fn audit(&self) -> &Addr<AuditRegistry> {
        &self.audit
    }

    /// Key holder side of the mock coprocessor. Used to encrypt inputs and decrypt results.
    pub fn coprocessor(&self) -> &MockCoprocessor {
        &self.coprocessor
    }

    pub fn history(&self) -> Result<Addr<HistoryCollector<StatsEvent>>> {
        self.history
            .clone()
            .ok_or(anyhow!("No history collector exists. We are likely not in test mode"))
    }

    pub fn in_mem_store(&self) -> Option<&Addr<InMemStore>> {
        self.store.get_addr().to_maybe_in_mem()
    }

    /// Broadcast a shutdown so persistent stores flush before the system stops
    pub fn shutdown(&self) {
        self.bus.do_send(StatsEvent::from(Shutdown));
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::StatsNodeHandle;
use actix::{Actor, Addr};
use anyhow::{anyhow, Result};
use cipherstat_aggregator::{
    AuditRegistry, SharedClock, StatsAggregator, StatsAggregatorParams, SystemClock,
    DEFAULT_THRESHOLD,
};
use cipherstat_config::AppConfig;
use cipherstat_data::{DataStore, InMemStore, SledStore};
use cipherstat_events::{EventBus, StatsEvent};
use cipherstat_fhe::{MockCoprocessor, SharedAlgebra};
use cipherstat_logger::SimpleLogger;
use cipherstat_utils::SharedRng;
use derivative::Derivative;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

/// Build an aggregation node: event bus, store, coprocessor, aggregator and audit registry.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct StatsNodeBuilder {
    #[derivative(Debug = "ignore")]
    algebra: Option<SharedAlgebra>,
    #[derivative(Debug = "ignore")]
    clock: Option<SharedClock>,
    #[derivative(Debug = "ignore")]
    coprocessor: Option<Arc<MockCoprocessor>>,
    datastore: Option<DataStore>,
    db_file: Option<PathBuf>,
    logging: bool,
    name: String,
    #[derivative(Debug = "ignore")]
    rng: SharedRng,
    source_bus: Option<BusMode<Addr<EventBus<StatsEvent>>>>,
    testmode_history: bool,
    threshold: u64,
}

#[derive(Clone, Debug)]
pub enum BusMode<T> {
    Forked(T),
    Source(T),
}

impl StatsNodeBuilder {
    pub fn new(rng: SharedRng) -> Self {
        Self {
            algebra: None,
            clock: None,
            coprocessor: None,
            datastore: None,
            db_file: None,
            logging: false,
            name: "cipherstat".to_string(),
            rng,
            source_bus: None,
            testmode_history: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Seed a builder from the resolved application config
    pub fn from_config(rng: SharedRng, config: &AppConfig) -> Self {
        let builder = Self::new(rng)
            .with_name(&config.name())
            .with_threshold(config.threshold());

        if config.use_in_mem_store() {
            builder
        } else {
            builder.with_sled_store(config.db_file())
        }
    }

    /// Name used when tracing node components
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Use the given bus for all events. No new bus is created.
    pub fn with_source_bus(mut self, bus: &Addr<EventBus<StatsEvent>>) -> Self {
        self.source_bus = Some(BusMode::Source(bus.clone()));
        self
    }

    /// Fork all events from the given source bus into a bus local to this node
    pub fn testmode_with_forked_bus(mut self, bus: &Addr<EventBus<StatsEvent>>) -> Self {
        self.source_bus = Some(BusMode::Forked(bus.clone()));
        self
    }

    /// Attach an existing store to the node
    pub fn with_datastore(mut self, store: DataStore) -> Self {
        self.datastore = Some(store);
        self
    }

    /// Persist to a sled database at the given path
    pub fn with_sled_store(mut self, db_file: PathBuf) -> Self {
        self.db_file = Some(db_file);
        self
    }

    /// Attach a history collecting test module.
    /// This is conspicuously named so we understand that this should only be used when testing
    pub fn testmode_with_history(mut self) -> Self {
        self.testmode_history = true;
        self
    }

    /// Log every event on the bus and capture data actor operations
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share a coprocessor between nodes or with a test harness
    pub fn with_coprocessor(mut self, coprocessor: Arc<MockCoprocessor>) -> Self {
        self.coprocessor = Some(coprocessor);
        self
    }

    /// Route the aggregation core through a different algebra than the coprocessor. Mainly used
    /// to inject failures in tests.
    pub fn with_algebra(mut self, algebra: SharedAlgebra) -> Self {
        self.algebra = Some(algebra);
        self
    }

    fn create_local_bus(&self) -> Addr<EventBus<StatsEvent>> {
        EventBus::<StatsEvent>::default().start()
    }

    fn create_store(&self, bus: &Addr<EventBus<StatsEvent>>) -> Result<DataStore> {
        if let Some(store) = self.datastore.clone() {
            return Ok(store);
        }

        if let Some(ref db_file) = self.db_file {
            info!("Using sled store at {}", db_file.display());
            let addr = SledStore::new(bus, db_file)?;
            return Ok((&addr).into());
        }

        info!("Using in memory store");
        Ok((&InMemStore::new(self.logging).start()).into())
    }

    pub async fn build(self) -> Result<StatsNodeHandle> {
        let bus = match self.source_bus {
            Some(BusMode::Forked(ref source)) => {
                let local_bus = self.create_local_bus();
                info!("Setting up Event pipe");
                EventBus::pipe(source, &local_bus);
                local_bus
            }
            Some(BusMode::Source(ref source)) => source.clone(),
            None => self.create_local_bus(),
        };

        let history = if self.testmode_history {
            info!("Setting up history collector");
            Some(EventBus::<StatsEvent>::history(&bus))
        } else {
            None
        };

        if self.logging {
            SimpleLogger::<StatsEvent>::attach(&self.name, bus.clone());
        }

        let store = self.create_store(&bus)?;

        let coprocessor = match self.coprocessor.clone() {
            Some(coprocessor) => coprocessor,
            None => Arc::new(
                MockCoprocessor::new(self.rng.clone())
                    .map_err(|e| anyhow!("Could not start coprocessor: {e}"))?,
            ),
        };
        let algebra: SharedAlgebra = match self.algebra.clone() {
            Some(algebra) => algebra,
            None => coprocessor.clone(),
        };
        let clock = self
            .clock
            .clone()
            .unwrap_or_else(|| Arc::new(SystemClock));

        let aggregator = StatsAggregator::attach(StatsAggregatorParams {
            algebra: algebra.clone(),
            clock,
            bus: bus.clone(),
            store: store.clone(),
            threshold: self.threshold,
        })
        .await?;

        let audit = AuditRegistry::attach(algebra.clone(), &bus, &store);

        info!(node = %self.name, threshold = self.threshold, "node ready");

        Ok(StatsNodeHandle {
            name: self.name,
            store,
            bus,
            algebra,
            coprocessor,
            aggregator,
            audit,
            history,
        })
    }
}

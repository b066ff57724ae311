// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Get, Insert, InsertBatch, InsertSync, Remove, SledDb};
use actix::{Actor, ActorContext, Addr, Handler};
use anyhow::{anyhow, Result};
use cipherstat_events::{EventBus, StatsEvent, Subscribe};
use std::path::Path;
use tracing::{error, info};

/// Sled backed key value store. Stops and releases the db on Shutdown.
pub struct SledStore {
    db: Option<SledDb>,
}

impl Actor for SledStore {
    type Context = actix::Context<Self>;
}

impl SledStore {
    pub fn new(bus: &Addr<EventBus<StatsEvent>>, path: &Path) -> Result<Addr<Self>> {
        info!("Starting SledStore with {:?}", path);
        let db = SledDb::open(path, "datastore")?;

        let store = Self { db: Some(db) }.start();

        bus.do_send(Subscribe::new("Shutdown", store.clone().recipient()));

        Ok(store)
    }
}

impl Handler<Insert> for SledStore {
    type Result = ();

    fn handle(&mut self, event: Insert, _: &mut Self::Context) -> Self::Result {
        if let Some(db) = &self.db {
            if let Err(err) = db.insert(&event.key, &event.value) {
                error!("{err:?}");
            }
        }
    }
}

impl Handler<InsertSync> for SledStore {
    type Result = Result<()>;

    fn handle(&mut self, event: InsertSync, _: &mut Self::Context) -> Self::Result {
        let Some(db) = &self.db else {
            return Err(anyhow!("Attempt to write to dropped db"));
        };
        db.insert(&event.key, &event.value)?;
        db.flush()
    }
}

impl Handler<InsertBatch> for SledStore {
    type Result = Result<()>;

    fn handle(&mut self, event: InsertBatch, _: &mut Self::Context) -> Self::Result {
        let Some(db) = &self.db else {
            return Err(anyhow!("Attempt to write to dropped db"));
        };
        db.insert_batch(&event.0)?;
        db.flush()
    }
}

impl Handler<Remove> for SledStore {
    type Result = ();

    fn handle(&mut self, event: Remove, _: &mut Self::Context) -> Self::Result {
        if let Some(db) = &self.db {
            if let Err(err) = db.remove(&event.key) {
                error!("{err:?}");
            }
        }
    }
}

impl Handler<Get> for SledStore {
    type Result = Option<Vec<u8>>;

    fn handle(&mut self, event: Get, _: &mut Self::Context) -> Self::Result {
        let Some(ref db) = self.db else {
            error!("Attempt to get data from dropped db");
            return None;
        };
        match db.get(&event.key) {
            Ok(v) => v,
            Err(err) => {
                error!("{err:?}");
                None
            }
        }
    }
}

impl Handler<StatsEvent> for SledStore {
    type Result = ();
    fn handle(&mut self, msg: StatsEvent, ctx: &mut Self::Context) -> Self::Result {
        if let StatsEvent::Shutdown { .. } = msg {
            if let Some(db) = self.db.take() {
                if let Err(err) = db.flush() {
                    error!("{err:?}");
                }
            }
            ctx.stop()
        }
    }
}

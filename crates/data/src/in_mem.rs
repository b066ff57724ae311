// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Get, Insert, InsertBatch, InsertSync, Remove};
use actix::{Actor, Handler, Message};
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// Read the mutation log of a capturing store
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "Vec<DataOp>")]
pub struct GetLog;

/// Serialize the whole store with bincode
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "anyhow::Result<Vec<u8>>")]
pub struct GetDump;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
    /// Puts applied by one `InsertBatch`
    Batch(Vec<DataOp>),
}

/// Key value store held in process memory. Backs tests and `in_mem_store` nodes. With
/// `capture` set every mutation is also appended to a log readable through `GetLog`.
pub struct InMemStore {
    db: BTreeMap<Vec<u8>, Vec<u8>>,
    log: Option<Vec<DataOp>>,
}

impl Actor for InMemStore {
    type Context = actix::Context<Self>;
}

impl InMemStore {
    pub fn new(capture: bool) -> Self {
        Self {
            db: BTreeMap::new(),
            log: capture.then(Vec::new),
        }
    }

    /// Rebuild a store from the bytes returned by `GetDump`
    pub fn from_dump(dump: Vec<u8>, capture: bool) -> Result<Self> {
        Ok(Self {
            db: bincode::deserialize(&dump).context("Could not read store dump")?,
            log: capture.then(Vec::new),
        })
    }

    pub fn get_dump(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.db).context("Could not dump store")
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if let Some(log) = self.log.as_mut() {
            log.push(DataOp::Put {
                key: key.clone(),
                value: value.clone(),
            });
        }
        self.db.insert(key, value);
    }

    fn delete(&mut self, key: Vec<u8>) {
        self.db.remove(&key);
        if let Some(log) = self.log.as_mut() {
            log.push(DataOp::Delete { key });
        }
    }
}

impl Handler<Insert> for InMemStore {
    type Result = ();

    fn handle(&mut self, msg: Insert, _: &mut Self::Context) {
        self.put(msg.key, msg.value);
    }
}

impl Handler<InsertSync> for InMemStore {
    type Result = Result<()>;

    fn handle(&mut self, msg: InsertSync, _: &mut Self::Context) -> Self::Result {
        self.put(msg.key, msg.value);
        Ok(())
    }
}

impl Handler<InsertBatch> for InMemStore {
    type Result = Result<()>;

    fn handle(&mut self, msg: InsertBatch, _: &mut Self::Context) -> Self::Result {
        let mut applied = Vec::with_capacity(msg.len());
        for Insert { key, value } in msg.0 {
            if self.log.is_some() {
                applied.push(DataOp::Put {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
            self.db.insert(key, value);
        }
        if let Some(log) = self.log.as_mut() {
            log.push(DataOp::Batch(applied));
        }
        Ok(())
    }
}

impl Handler<Remove> for InMemStore {
    type Result = ();

    fn handle(&mut self, msg: Remove, _: &mut Self::Context) {
        self.delete(msg.key);
    }
}

impl Handler<Get> for InMemStore {
    type Result = Option<Vec<u8>>;

    fn handle(&mut self, msg: Get, _: &mut Self::Context) -> Self::Result {
        self.db.get(&msg.key).cloned()
    }
}

impl Handler<GetLog> for InMemStore {
    type Result = Vec<DataOp>;

    fn handle(&mut self, _: GetLog, _: &mut Self::Context) -> Self::Result {
        self.log.clone().unwrap_or_default()
    }
}

impl Handler<GetDump> for InMemStore {
    type Result = anyhow::Result<Vec<u8>>;

    fn handle(&mut self, _: GetDump, _: &mut Self::Context) -> Self::Result {
        self.get_dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix::test]
    async fn test_log_captures_mutations() -> Result<()> {
        let addr = InMemStore::new(true).start();
        addr.send(Insert::new("//a", vec![1])).await?;
        addr.send(InsertSync::new("//b", vec![2])).await??;
        addr.send(Remove::new("//a")).await?;

        assert_eq!(
            addr.send(GetLog).await?,
            vec![
                DataOp::Put {
                    key: b"//a".to_vec(),
                    value: vec![1]
                },
                DataOp::Put {
                    key: b"//b".to_vec(),
                    value: vec![2]
                },
                DataOp::Delete {
                    key: b"//a".to_vec()
                },
            ]
        );
        assert_eq!(addr.send(Get::new("//a")).await?, None);
        Ok(())
    }

    #[actix::test]
    async fn test_batch_is_logged_as_one_op() -> Result<()> {
        let addr = InMemStore::new(true).start();
        let mut batch = InsertBatch::new();
        batch.push(Insert::new("//engine", vec![1]));
        batch.push(Insert::new("//ledger/data/1", vec![2]));
        addr.send(batch).await??;

        assert_eq!(
            addr.send(GetLog).await?,
            vec![DataOp::Batch(vec![
                DataOp::Put {
                    key: b"//engine".to_vec(),
                    value: vec![1]
                },
                DataOp::Put {
                    key: b"//ledger/data/1".to_vec(),
                    value: vec![2]
                },
            ])]
        );
        assert_eq!(addr.send(Get::new("//ledger/data/1")).await?, Some(vec![2]));
        Ok(())
    }

    #[actix::test]
    async fn test_log_is_empty_without_capture() -> Result<()> {
        let addr = InMemStore::new(false).start();
        addr.send(Insert::new("//a", vec![1])).await?;
        assert!(addr.send(GetLog).await?.is_empty());
        Ok(())
    }

    #[actix::test]
    async fn test_dump_restores_contents() -> Result<()> {
        let addr = InMemStore::new(false).start();
        addr.send(InsertSync::new("//stats", vec![4, 2])).await??;
        let dump = addr.send(GetDump).await??;

        let restored = InMemStore::from_dump(dump, false)?.start();
        assert_eq!(restored.send(Get::new("//stats")).await?, Some(vec![4, 2]));
        Ok(())
    }
}

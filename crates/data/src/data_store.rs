// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Get, InMemStore, Insert, InsertBatch, InsertSync, IntoKey, Remove, SledStore};
use actix::{Addr, Handler, MailboxError, Message};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::error;

/// The store actor behind a `DataStore`
#[derive(Clone, Debug)]
pub enum StoreAddr {
    InMem(Addr<InMemStore>),
    Sled(Addr<SledStore>),
}

impl StoreAddr {
    pub fn to_maybe_in_mem(&self) -> Option<&Addr<InMemStore>> {
        match self {
            StoreAddr::InMem(ref store) => Some(store),
            StoreAddr::Sled(_) => None,
        }
    }

    fn do_send<M>(&self, msg: M)
    where
        M: Message + Send + 'static,
        M::Result: Send,
        InMemStore: Handler<M>,
        SledStore: Handler<M>,
    {
        match self {
            StoreAddr::InMem(addr) => addr.do_send(msg),
            StoreAddr::Sled(addr) => addr.do_send(msg),
        }
    }

    async fn send<M>(&self, msg: M) -> Result<M::Result, MailboxError>
    where
        M: Message + Send + 'static,
        M::Result: Send,
        InMemStore: Handler<M>,
        SledStore: Handler<M>,
    {
        match self {
            StoreAddr::InMem(addr) => addr.send(msg).await,
            StoreAddr::Sled(addr) => addr.send(msg).await,
        }
    }
}

/// Handle to one key of a store actor. Values are bincode encoded. Cloning is cheap and
/// `scope`/`base` derive handles to other keys of the same store.
#[derive(Clone, Debug)]
pub struct DataStore {
    scope: Vec<u8>,
    addr: StoreAddr,
}

impl DataStore {
    /// Read data at the scope location
    pub async fn read<T>(&self) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(bytes) = self.addr.send(Get::new(&self.scope)).await? else {
            return Ok(None);
        };

        // A null value does not deserialize correctly
        if bytes == [0] {
            return Ok(None);
        }

        let value = bincode::deserialize(&bytes)
            .with_context(|| format!("Could not decode value at {}", self.get_scope()))?;
        Ok(Some(value))
    }

    /// Queue a write. Reads sent afterwards through any handle to the same store observe it.
    pub fn write<T: Serialize>(&self, value: T) {
        match bincode::serialize(&value) {
            Ok(bytes) => self.addr.do_send(Insert::new(&self.scope, bytes)),
            Err(e) => error!("Could not serialize value passed to {}: {e}", self.get_scope()),
        }
    }

    /// Write and wait until the store has persisted the value
    pub async fn write_sync<T: Serialize>(&self, value: T) -> Result<()> {
        let bytes = bincode::serialize(&value)
            .with_context(|| format!("Could not serialize value passed to {}", self.get_scope()))?;
        self.addr.send(InsertSync::new(&self.scope, bytes)).await?
    }

    /// Start a batch of writes against this store
    pub fn batch(&self) -> WriteBatch {
        WriteBatch {
            addr: self.addr.clone(),
            inserts: InsertBatch::new(),
        }
    }

    pub fn clear(&self) {
        self.addr.do_send(Remove::new(&self.scope))
    }

    pub fn get_scope(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.scope)
    }

    pub fn get_addr(&self) -> &StoreAddr {
        &self.addr
    }

    /// Nest `key` under the current scope, inserting a slash when `key` has none.
    /// ```
    /// use cipherstat_data::DataStore;
    /// use cipherstat_data::InMemStore;
    /// use actix::Actor;
    ///
    /// #[actix::main]
    /// async fn main() {
    ///   let addr = InMemStore::new(false).start();
    ///   let store = DataStore::from(&addr);
    ///   assert_eq!(store.base("//ledger")
    ///     .scope("data")
    ///     .scope("/7")
    ///     .get_scope(), "//ledger/data/7");
    /// }
    /// ```
    pub fn scope<K: IntoKey>(&self, key: K) -> Self {
        let key = key.into_key();
        let mut scope = self.scope.clone();
        if !key.starts_with(b"/") {
            scope.push(b'/');
        }
        scope.extend(key);
        Self {
            scope,
            addr: self.addr.clone(),
        }
    }

    /// Same store, with `key` as the absolute scope
    pub fn base<K: IntoKey>(&self, key: K) -> Self {
        Self {
            scope: key.into_key(),
            addr: self.addr.clone(),
        }
    }
}

/// Writes collected from several keys and committed atomically. Targets must be handles to
/// the store the batch was started from.
#[derive(Debug)]
pub struct WriteBatch {
    addr: StoreAddr,
    inserts: InsertBatch,
}

impl WriteBatch {
    pub fn put<T: Serialize>(&mut self, target: &DataStore, value: T) -> Result<()> {
        let bytes = bincode::serialize(&value).with_context(|| {
            format!("Could not serialize value passed to {}", target.get_scope())
        })?;
        self.inserts.push(Insert::new(&target.scope, bytes));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inserts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
    }

    /// Send the batch and wait until the store has applied all of it
    pub async fn commit(self) -> Result<()> {
        self.addr.send(self.inserts).await?
    }
}

impl From<StoreAddr> for DataStore {
    fn from(addr: StoreAddr) -> Self {
        Self {
            scope: vec![],
            addr,
        }
    }
}

impl From<&Addr<SledStore>> for DataStore {
    fn from(addr: &Addr<SledStore>) -> Self {
        StoreAddr::Sled(addr.clone()).into()
    }
}

impl From<&Addr<InMemStore>> for DataStore {
    fn from(addr: &Addr<InMemStore>) -> Self {
        StoreAddr::InMem(addr.clone()).into()
    }
}

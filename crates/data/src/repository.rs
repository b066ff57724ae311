// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::DataStore;
use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, marker::PhantomData, ops::Deref};

/// Typed view over a single key. The store itself is untyped so the type lives here.
pub struct Repository<T> {
    store: DataStore,
    _value: PhantomData<fn() -> T>,
}

impl<T> Repository<T> {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            _value: PhantomData,
        }
    }
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

impl<T> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Repository").field(&self.store).finish()
    }
}

impl<T> Deref for Repository<T> {
    type Target = DataStore;

    fn deref(&self) -> &DataStore {
        &self.store
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> {
    pub async fn read(&self) -> Result<Option<T>> {
        self.store.read().await
    }

    pub fn write(&self, value: &T) {
        self.store.write(value)
    }

    pub async fn write_sync(&self, value: &T) -> Result<()> {
        self.store.write_sync(value).await
    }

    pub fn clear(&self) {
        self.store.clear()
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Repository, WriteBatch};
use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Serialize};

pub trait PersistableData: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}
impl<T> PersistableData for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T: PersistableData> Repository<T> {
    /// Read the stored value into a write-through container
    pub async fn load(&self) -> Result<Persistable<T>> {
        let value = self.read().await?;
        Ok(Persistable::wrap(value, self.clone()))
    }

    /// Like `load` but seeds and writes `default` when nothing is stored yet
    pub async fn load_or_default(&self, default: T) -> Result<Persistable<T>> {
        let value = self.read().await?.unwrap_or(default);
        let container = Persistable::wrap(Some(value), self.clone());
        container.flush();
        Ok(container)
    }

    /// Wrap `value` and write it out immediately
    pub fn send(&self, value: Option<T>) -> Persistable<T> {
        let container = Persistable::wrap(value, self.clone());
        container.flush();
        container
    }
}

/// In-memory copy of a repository value. Every successful change is written back to the
/// store; a failed change is discarded before anything reaches the store.
#[derive(Debug)]
pub struct Persistable<T> {
    value: Option<T>,
    repo: Repository<T>,
}

impl<T: PersistableData> Persistable<T> {
    fn wrap(value: Option<T>, repo: Repository<T>) -> Self {
        Self { value, repo }
    }

    /// Run `f` over a copy of the value. The copy replaces the value only if `f` succeeds.
    pub fn try_mutate<F, E>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(T) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        let next = f(self.try_get()?)?;
        self.value = Some(next);
        self.flush();
        Ok(())
    }

    /// Run `f` over a copy of the value and add the result to `batch`. Nothing changes here
    /// until the batch has committed and the result is handed to `commit_staged`.
    pub fn try_stage<F, E>(&self, batch: &mut WriteBatch, f: F) -> Result<T, E>
    where
        F: FnOnce(T) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        let next = f(self.try_get()?)?;
        batch.put(&self.repo, &next)?;
        Ok(next)
    }

    /// Adopt a value that a committed batch already wrote
    pub fn commit_staged(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.flush();
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.flush();
    }

    pub fn get(&self) -> Option<T> {
        self.value.clone()
    }

    pub fn try_get(&self) -> Result<T> {
        self.get()
            .ok_or_else(|| anyhow!("No value loaded from repository"))
    }

    pub fn has(&self) -> bool {
        self.value.is_some()
    }

    fn flush(&self) {
        if let Some(value) = &self.value {
            self.repo.write(value);
        } else {
            self.repo.clear();
        }
    }
}

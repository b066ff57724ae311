// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{DataStore, IntoKey, Repository};

/// Typed views over one store. Domain crates add factory traits to this type, one method per
/// kind of record they persist.
#[derive(Clone, Debug)]
pub struct Repositories {
    store: DataStore,
}

impl Repositories {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Repository at the absolute key `key`
    pub fn at<T, K: IntoKey>(&self, key: K) -> Repository<T> {
        Repository::new(self.store.base(key))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }
}

pub trait RepositoriesFactory {
    fn repositories(&self) -> Repositories;
}

impl RepositoriesFactory for DataStore {
    fn repositories(&self) -> Repositories {
        Repositories::new(self.clone())
    }
}

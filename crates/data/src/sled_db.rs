// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::Insert;
use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use sled::{Batch, Db, Tree};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::info;

/// sled locks its directory so every handle in the process must share one `Db`
static OPEN_DBS: Lazy<Mutex<HashMap<PathBuf, Db>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn open_shared(path: &Path) -> Result<Db> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("Could not create db directory {}", path.display()))?;
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let mut open = OPEN_DBS
        .lock()
        .map_err(|e| anyhow!("db registry poisoned: {e}"))?;
    if let Some(db) = open.get(&key) {
        return Ok(db.clone());
    }

    let db = sled::open(path)
        .with_context(|| format!("Could not open database at path '{}'", path.display()))?;
    if db.was_recovered() {
        info!("recovered db at: {:?}", path);
    } else {
        info!("created db at: {:?}", path);
    }
    open.insert(key, db.clone());
    Ok(db)
}

/// One named tree inside a process wide shared sled database
pub struct SledDb {
    tree: Tree,
}

impl SledDb {
    pub fn open(path: &Path, tree: &str) -> Result<Self> {
        let tree = open_shared(path)?
            .open_tree(tree)
            .with_context(|| format!("Could not open tree '{tree}'"))?;
        Ok(Self { tree })
    }

    pub fn insert(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.tree
            .insert(key, value)
            .context("Could not insert data into db")?;
        Ok(())
    }

    /// Apply every insert atomically
    pub fn insert_batch(&self, inserts: &[Insert]) -> Result<()> {
        let mut batch = Batch::default();
        for insert in inserts {
            batch.insert(insert.key.as_slice(), insert.value.as_slice());
        }
        self.tree
            .apply_batch(batch)
            .context("Could not apply batch to db")?;
        Ok(())
    }

    pub fn remove(&self, key: &[u8]) -> Result<()> {
        self.tree
            .remove(key)
            .context("Could not remove data from db")?;
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let value = self
            .tree
            .get(key)
            .with_context(|| format!("Failed to fetch {}", String::from_utf8_lossy(key)))?;
        Ok(value.map(|v| v.to_vec()))
    }

    pub fn flush(&self) -> Result<()> {
        self.tree.flush().context("Could not flush db")?;
        Ok(())
    }
}

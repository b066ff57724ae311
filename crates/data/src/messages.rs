// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::IntoKey;
use actix::Message;
use anyhow::Result;

/// Fire and forget write. Store failures are logged by the store.
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "()")]
pub struct Insert {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Insert {
    pub fn new<K: IntoKey>(key: K, value: Vec<u8>) -> Self {
        Self {
            key: key.into_key(),
            value,
        }
    }
}

/// Write that replies once the value is durable
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "Result<()>")]
pub struct InsertSync {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl InsertSync {
    pub fn new<K: IntoKey>(key: K, value: Vec<u8>) -> Self {
        Self {
            key: key.into_key(),
            value,
        }
    }
}

#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "Option<Vec<u8>>")]
pub struct Get {
    pub key: Vec<u8>,
}

impl Get {
    pub fn new<K: IntoKey>(key: K) -> Self {
        Self {
            key: key.into_key(),
        }
    }
}

#[derive(Message, Clone, Debug, PartialEq, Eq, Hash)]
#[rtype(result = "()")]
pub struct Remove {
    pub key: Vec<u8>,
}

impl Remove {
    pub fn new<K: IntoKey>(key: K) -> Self {
        Self {
            key: key.into_key(),
        }
    }
}

/// Writes that land together or not at all. Replies once the store has applied them.
#[derive(Message, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[rtype(result = "Result<()>")]
pub struct InsertBatch(pub Vec<Insert>);

impl InsertBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, insert: Insert) {
        self.0.push(insert);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

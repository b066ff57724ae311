// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_utils::U256;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Source of submission timestamps. Values are opaque to the ledger and need not be monotonic.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> U256;
}

pub type SharedClock = Arc<dyn Clock>;

/// Unix seconds from the system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> U256 {
        U256::from(chrono::Utc::now().timestamp().max(0) as u64)
    }
}

/// Clock that only moves when told to
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start)))
    }

    pub fn set(&self, value: u64) {
        self.0.store(value, Ordering::SeqCst);
    }

    pub fn advance(&self, by: u64) {
        self.0.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> U256 {
        U256::from(self.0.load(Ordering::SeqCst))
    }
}

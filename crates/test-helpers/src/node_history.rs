// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use cipherstat_events::{Event, GetEvents, ResetHistory, StatsEvent, TakeEvents};
use cipherstat_node_builder::StatsNodeHandle;
use std::{ops::Deref, time::Duration};
use tokio::time::timeout;

/// Events a node has published so far
#[derive(Debug, Clone)]
pub struct NodeHistory(Vec<StatsEvent>);

impl NodeHistory {
    pub async fn get(node: &StatsNodeHandle) -> Result<Self> {
        Ok(Self(node.history()?.send(GetEvents::<StatsEvent>::new()).await?))
    }

    /// Wait for `count` events to be published
    pub async fn take(node: &StatsNodeHandle, count: usize) -> Result<Self> {
        Self::take_with_timeout(node, count, Duration::from_millis(4000)).await
    }

    pub async fn take_with_timeout(
        node: &StatsNodeHandle,
        count: usize,
        tout: Duration,
    ) -> Result<Self> {
        let history = node.history()?;
        let events = timeout(tout, history.send(TakeEvents::<StatsEvent>::new(count)))
            .await
            .context(format!("Could not take {} events from {}", count, node.name))??;

        Ok(Self(events))
    }

    pub async fn reset(node: &StatsNodeHandle) -> Result<()> {
        node.history()?.send(ResetHistory).await?;
        Ok(())
    }

    pub fn filter_by_event_type(&self, event_type: &str) -> Vec<StatsEvent> {
        self.0
            .iter()
            .filter(|e| e.event_type() == event_type)
            .cloned()
            .collect()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.0.iter().map(|e| e.event_type()).collect()
    }
}

impl Deref for NodeHistory {
    type Target = Vec<StatsEvent>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

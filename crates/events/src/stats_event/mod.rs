// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod audit_verified;
mod data_submitted;
mod shutdown;
mod stats_updated;
mod vote_submitted;

pub use audit_verified::*;
pub use data_submitted::*;
pub use shutdown::*;
pub use stats_updated::*;
pub use vote_submitted::*;

use crate::{Event, EventId};
use actix::Message;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoStaticStr;

macro_rules! impl_from_event {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for StatsEvent {
                fn from(data: $variant) -> Self {
                    StatsEvent::$variant {
                        id: EventId::hash(&data),
                        data,
                    }
                }
            }
        )*
    };
}

/// Notifications published by the aggregation core
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
#[rtype(result = "()")]
pub enum StatsEvent {
    DataSubmitted { id: EventId, data: DataSubmitted },
    VoteSubmitted { id: EventId, data: VoteSubmitted },
    StatsUpdated { id: EventId, data: StatsUpdated },
    AuditVerified { id: EventId, data: AuditVerified },
    Shutdown { id: EventId, data: Shutdown },
}

impl StatsEvent {
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    pub fn get_id(&self) -> EventId {
        match self {
            StatsEvent::DataSubmitted { id, .. }
            | StatsEvent::VoteSubmitted { id, .. }
            | StatsEvent::StatsUpdated { id, .. }
            | StatsEvent::AuditVerified { id, .. }
            | StatsEvent::Shutdown { id, .. } => id.clone(),
        }
    }

    pub fn get_data(&self) -> String {
        match self {
            StatsEvent::DataSubmitted { data, .. } => data.to_string(),
            StatsEvent::VoteSubmitted { data, .. } => data.to_string(),
            StatsEvent::StatsUpdated { data, .. } => data.to_string(),
            StatsEvent::AuditVerified { data, .. } => data.to_string(),
            StatsEvent::Shutdown { data, .. } => data.to_string(),
        }
    }
}

impl Event for StatsEvent {
    type Id = EventId;

    fn event_type(&self) -> String {
        let name: &'static str = self.into();
        name.to_string()
    }

    fn event_id(&self) -> Self::Id {
        self.get_id()
    }
}

impl_from_event!(
    DataSubmitted,
    VoteSubmitted,
    StatsUpdated,
    AuditVerified,
    Shutdown
);

impl fmt::Display for StatsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.event_type(), self.get_data())
    }
}

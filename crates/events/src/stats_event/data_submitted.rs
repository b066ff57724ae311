// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use actix::Message;
use cipherstat_utils::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A data point was appended to the ledger and folded into the aggregate
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct DataSubmitted {
    pub id: U256,
    pub timestamp: U256,
}

impl Display for DataSubmitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {}, timestamp: {}", self.id, self.timestamp)
    }
}

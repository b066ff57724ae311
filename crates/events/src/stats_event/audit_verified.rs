// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use actix::Message;
use cipherstat_utils::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Emitted when a proof is *stored* for `data_id`. Nothing has been verified at this point.
#[derive(Message, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct AuditVerified {
    pub data_id: U256,
}

impl Display for AuditVerified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data_id: {}", self.data_id)
    }
}

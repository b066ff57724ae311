// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Notifications emitted by the aggregation core and the actor bus that carries them.

mod event_id;
mod eventbus;
mod history;
mod stats_event;
mod traits;

pub use event_id::EventId;
pub use eventbus::*;
pub use history::*;
pub use stats_event::*;
pub use traits::Event;

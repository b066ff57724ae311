// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use actix::Message;
use std::{fmt::Display, hash::Hash};

/// Anything the [`crate::EventBus`] can route. `event_type` is the subscription key and
/// `event_id` feeds optional deduplication.
pub trait Event:
    Message<Result = ()> + Clone + Display + Send + Sync + Unpin + Sized + 'static
{
    type Id: Hash + Eq + Clone + Display + Send + Sync + Unpin;

    fn event_type(&self) -> String;

    fn event_id(&self) -> Self::Id;
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::Event;
use actix::prelude::*;
use std::collections::VecDeque;
use std::marker::PhantomData;
use tokio::sync::oneshot;
use tracing::debug;

/// Snapshot of events not yet taken
#[derive(Message)]
#[rtype(result = "Vec<E>")]
pub struct GetEvents<E: Event>(PhantomData<E>);

impl<E: Event> GetEvents<E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: Event> Default for GetEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove and return the next `count` events, waiting until that many have arrived
#[derive(Message)]
#[rtype(result = "Vec<E>")]
pub struct TakeEvents<E: Event> {
    count: usize,
    _e: PhantomData<E>,
}

impl<E: Event> TakeEvents<E> {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            _e: PhantomData,
        }
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ResetHistory;

struct Waiter<E> {
    count: usize,
    reply: oneshot::Sender<Vec<E>>,
}

/// Records every event it receives. Waiting takes are served first come first served.
pub struct HistoryCollector<E: Event> {
    buffer: VecDeque<E>,
    waiters: VecDeque<Waiter<E>>,
}

impl<E: Event> Actor for HistoryCollector<E> {
    type Context = Context<Self>;
}

impl<E: Event> Default for HistoryCollector<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> HistoryCollector<E> {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            waiters: VecDeque::new(),
        }
    }

    fn serve_waiters(&mut self) {
        while let Some(front) = self.waiters.front() {
            if front.count > self.buffer.len() {
                break;
            }
            let Some(waiter) = self.waiters.pop_front() else {
                break;
            };
            let events = self.buffer.drain(..waiter.count).collect();
            // A dropped receiver means the caller timed out
            let _ = waiter.reply.send(events);
        }
    }
}

impl<E: Event> Handler<E> for HistoryCollector<E> {
    type Result = ();

    fn handle(&mut self, event: E, _: &mut Self::Context) {
        self.buffer.push_back(event);
        self.serve_waiters();
    }
}

impl<E: Event> Handler<GetEvents<E>> for HistoryCollector<E> {
    type Result = Vec<E>;

    fn handle(&mut self, _: GetEvents<E>, _: &mut Context<Self>) -> Vec<E> {
        self.buffer.iter().cloned().collect()
    }
}

impl<E: Event> Handler<TakeEvents<E>> for HistoryCollector<E> {
    type Result = ResponseFuture<Vec<E>>;

    fn handle(&mut self, msg: TakeEvents<E>, _: &mut Context<Self>) -> Self::Result {
        let (reply, rx) = oneshot::channel();
        if self.buffer.len() < msg.count {
            debug!(
                wanted = msg.count,
                buffered = self.buffer.len(),
                "waiting for events"
            );
        }
        self.waiters.push_back(Waiter {
            count: msg.count,
            reply,
        });
        self.serve_waiters();
        Box::pin(async move { rx.await.unwrap_or_default() })
    }
}

impl<E: Event> Handler<ResetHistory> for HistoryCollector<E> {
    type Result = ();

    fn handle(&mut self, _: ResetHistory, _: &mut Context<Self>) {
        self.buffer.clear();
        self.waiters.clear();
    }
}

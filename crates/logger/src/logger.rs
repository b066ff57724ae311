// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use actix::{Actor, Addr, Context, Handler};
use cipherstat_events::{Event, EventBus, StatsEvent, Subscribe};
use std::marker::PhantomData;
use tracing::info;

pub trait EventLogging: Event {
    fn log(&self, logger_name: &str);
}

/// Traces every event published on the bus it is attached to
pub struct SimpleLogger<E: EventLogging> {
    name: String,
    seen: usize,
    _p: PhantomData<E>,
}

impl<E: EventLogging> SimpleLogger<E> {
    pub fn attach(name: &str, bus: Addr<EventBus<E>>) -> Addr<Self> {
        let addr = Self {
            name: name.to_owned(),
            seen: 0,
            _p: PhantomData,
        }
        .start();
        bus.do_send(Subscribe::<E>::new("*", addr.clone().recipient()));
        info!(node=%name, "READY!");
        addr
    }
}

impl<E: EventLogging> Actor for SimpleLogger<E> {
    type Context = Context<Self>;
}

impl<E: EventLogging> Handler<E> for SimpleLogger<E> {
    type Result = ();

    fn handle(&mut self, msg: E, _: &mut Self::Context) -> Self::Result {
        self.seen += 1;
        msg.log(&self.name);
    }
}

#[derive(actix::Message)]
#[rtype(result = "usize")]
pub struct GetLoggedCount;

impl<E: EventLogging> Handler<GetLoggedCount> for SimpleLogger<E> {
    type Result = usize;

    fn handle(&mut self, _: GetLoggedCount, _: &mut Self::Context) -> Self::Result {
        self.seen
    }
}

impl EventLogging for StatsEvent {
    fn log(&self, logger_name: &str) {
        match self {
            StatsEvent::DataSubmitted { data, .. } => {
                info!(me = logger_name, evt = %self, id = %data.id, "Data submitted")
            }
            StatsEvent::VoteSubmitted { data, .. } => {
                info!(me = logger_name, evt = %self, id = %data.id, "Vote submitted")
            }
            StatsEvent::AuditVerified { data, .. } => {
                info!(me = logger_name, evt = %self, data_id = %data.data_id, "Audit proof stored")
            }
            StatsEvent::StatsUpdated { .. } | StatsEvent::Shutdown { .. } => {
                info!(me = logger_name, evt = %self, "Event Broadcasted")
            }
        }
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Event, HistoryCollector};
use actix::prelude::*;
use std::collections::HashMap;
use tracing::info;

/// Subscription key that receives every event regardless of type
pub const ALL_EVENTS: &str = "*";

/// Fan-out point for a node. Publishers `do_send` events here and subscribers register per
/// event type or with [`ALL_EVENTS`]. Delivery order follows the order events reach the bus
/// and every published event is delivered, including repeats of an identical payload.
pub struct EventBus<E: Event> {
    listeners: HashMap<String, Vec<Recipient<E>>>,
}

impl<E: Event> Actor for EventBus<E> {
    type Context = Context<Self>;
}

impl<E: Event> EventBus<E> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Start a collector that records everything published on `source`
    pub fn history(source: &Addr<EventBus<E>>) -> Addr<HistoryCollector<E>> {
        let collector = HistoryCollector::<E>::new().start();
        source.do_send(Subscribe::new(ALL_EVENTS, collector.clone().recipient()));
        collector
    }

    /// Forward every event on `source` into `dest`
    pub fn pipe(source: &Addr<EventBus<E>>, dest: &Addr<EventBus<E>>) {
        source.do_send(Subscribe::new(ALL_EVENTS, dest.clone().recipient()))
    }

    fn deliver(&self, key: &str, event: &E) {
        for listener in self.listeners.get(key).into_iter().flatten() {
            listener.do_send(event.clone());
        }
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Handler<E> for EventBus<E> {
    type Result = ();

    fn handle(&mut self, event: E, _: &mut Context<Self>) {
        info!("{} published", event);
        self.deliver(ALL_EVENTS, &event);
        self.deliver(&event.event_type(), &event);
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe<E: Event> {
    pub event_type: String,
    pub listener: Recipient<E>,
}

impl<E: Event> Subscribe<E> {
    pub fn new(event_type: impl Into<String>, listener: Recipient<E>) -> Self {
        Self {
            event_type: event_type.into(),
            listener,
        }
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unsubscribe<E: Event> {
    pub event_type: String,
    pub listener: Recipient<E>,
}

impl<E: Event> Unsubscribe<E> {
    pub fn new(event_type: impl Into<String>, listener: Recipient<E>) -> Self {
        Self {
            event_type: event_type.into(),
            listener,
        }
    }
}

impl<E: Event> Handler<Subscribe<E>> for EventBus<E> {
    type Result = ();

    fn handle(&mut self, msg: Subscribe<E>, _: &mut Context<Self>) {
        self.listeners
            .entry(msg.event_type)
            .or_default()
            .push(msg.listener);
    }
}

impl<E: Event> Handler<Unsubscribe<E>> for EventBus<E> {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe<E>, _: &mut Context<Self>) {
        if let Some(list) = self.listeners.get_mut(&msg.event_type) {
            list.retain(|l| l != &msg.listener);
        }
    }
}

/// Bus plus a collector already subscribed to it
pub fn new_event_bus_with_history<E: Event>() -> (Addr<EventBus<E>>, Addr<HistoryCollector<E>>) {
    let bus = EventBus::<E>::default().start();
    let history = EventBus::history(&bus);
    (bus, history)
}

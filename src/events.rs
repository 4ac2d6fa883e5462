// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use std::sync::mpsc::{Receiver, Sender, channel};
use tracing::debug;

/// Emitted after a mutation has been committed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "id", rename_all = "snake_case")]
pub enum ChangeEvent {
    CategoryAdded(i64),
    TransactionAdded(i64),
    TransactionUpdated(i64),
    TransactionDeleted(i64),
    EstimateAdded(i64),
    EstimateUpdated(i64),
    EstimateDeleted(i64),
}

impl ChangeEvent {
    pub fn id(&self) -> i64 {
        match *self {
            ChangeEvent::CategoryAdded(id)
            | ChangeEvent::TransactionAdded(id)
            | ChangeEvent::TransactionUpdated(id)
            | ChangeEvent::TransactionDeleted(id)
            | ChangeEvent::EstimateAdded(id)
            | ChangeEvent::EstimateUpdated(id)
            | ChangeEvent::EstimateDeleted(id) => id,
        }
    }

    /// Whether monthly totals and comparison series may be stale after this.
    pub fn affects_totals(&self) -> bool {
        !matches!(self, ChangeEvent::CategoryAdded(_))
    }
}

/// Fan-out of change events to any number of subscribers.
///
/// Subscribers whose receiver has been dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&mut self, event: ChangeEvent) -> usize {
        self.subscribers.retain(|s| s.send(event).is_ok());
        debug!(?event, delivered = self.subscribers.len(), "published change");
        self.subscribers.len()
    }
}

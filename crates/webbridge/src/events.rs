//! Diagnostic events recorded by the dispatch thread.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use webbridge_common::{BridgeError, InstanceId, InstanceState};

use crate::envelope::EventKind;

/// Oldest events are discarded past this many undrained entries.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Something the dispatch thread did or refused to do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// An envelope was taken off the queue.
    Dispatched {
        instance: InstanceId,
        kind: EventKind,
    },
    StateChanged {
        instance: InstanceId,
        from: InstanceState,
        to: InstanceState,
    },
    /// A native window exists for the instance.
    Created {
        instance: InstanceId,
    },
    Navigated {
        instance: InstanceId,
        url: String,
    },
    Destroyed {
        instance: InstanceId,
    },
    /// The envelope never reached the toolkit (unknown instance, wrong state).
    Rejected {
        instance: InstanceId,
        kind: EventKind,
        error: BridgeError,
    },
    /// The toolkit call failed.
    Failed {
        instance: InstanceId,
        kind: EventKind,
        error: BridgeError,
    },
    /// The dispatch thread stopped because the native subsystem broke.
    Fatal {
        reason: String,
    },
}

/// Bounded event buffer shared between the dispatch thread and the facade.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    events: Arc<Mutex<VecDeque<BridgeEvent>>>,
}

impl EventSink {
    pub fn push(&self, event: BridgeEvent) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if events.len() >= MAX_PENDING_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<BridgeEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.drain(..).collect()
    }
}

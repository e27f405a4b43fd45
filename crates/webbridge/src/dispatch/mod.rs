//! The native dispatch thread.
//!
//! `Dispatcher` owns the toolkit, every native handle and the instance
//! registry. Nothing else touches them: producers only reach this state by
//! sending envelopes through the queue.

mod handlers;

use tracing::{debug, error, info, warn};
use webbridge_common::{BridgeError, InstanceId, InstanceState, Rect};
use webbridge_config::NavigationConfig;

use crate::envelope::{Envelope, EventKind};
use crate::events::{BridgeEvent, EventSink};
use crate::native::{NativeError, NativeToolkit};
use crate::queue::QueueReceiver;
use crate::registry::InstanceRegistry;
use crate::rendezvous::Response;

/// Per-bridge settings the dispatch thread needs.
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    /// Bounds given to every new native window.
    pub initial_bounds: Rect,
    pub navigation: NavigationConfig,
}

/// Why one envelope could not be completed.
#[derive(Debug)]
pub(crate) enum DispatchError {
    /// Reported to the caller (or logged); the loop continues.
    Bridge(BridgeError),
    /// The native subsystem is gone; the loop stops.
    Fatal(String),
}

impl From<BridgeError> for DispatchError {
    fn from(e: BridgeError) -> Self {
        DispatchError::Bridge(e)
    }
}

impl DispatchError {
    fn from_native(e: NativeError) -> Self {
        match e {
            NativeError::Operation(msg) => DispatchError::Bridge(BridgeError::NativeOperation(msg)),
            NativeError::Fatal(msg) => DispatchError::Fatal(msg),
        }
    }

    fn from_native_create(e: NativeError) -> Self {
        match e {
            NativeError::Operation(msg) => DispatchError::Bridge(BridgeError::NativeCreation(msg)),
            NativeError::Fatal(msg) => DispatchError::Fatal(msg),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

pub(crate) struct Dispatcher<T: NativeToolkit> {
    toolkit: T,
    registry: InstanceRegistry<T::Handle>,
    settings: DispatchSettings,
    events: EventSink,
    initialized: bool,
}

impl<T: NativeToolkit> Dispatcher<T> {
    pub(crate) fn new(toolkit: T, settings: DispatchSettings, events: EventSink) -> Self {
        Self {
            toolkit,
            registry: InstanceRegistry::new(),
            settings,
            events,
            initialized: false,
        }
    }

    /// Drain the queue until `Shutdown`, a fatal fault, or every producer
    /// hanging up.
    pub(crate) fn run(mut self, queue: QueueReceiver) {
        info!("dispatch loop started");
        while let Some(envelope) = queue.dequeue() {
            match self.handle(envelope) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    info!("dispatch loop stopped");
                    return;
                }
                Err(reason) => {
                    self.abort(&reason, &queue);
                    return;
                }
            }
        }
        // Every producer dropped without sending Shutdown.
        self.destroy_all();
        info!("dispatch loop stopped, queue closed");
    }

    /// Stop after a fatal fault: every queued request resolves with
    /// `BridgeShutdown`.
    pub(crate) fn abort(&self, reason: &str, queue: &QueueReceiver) {
        abandon(reason, &self.events, queue);
    }

    fn handle(&mut self, envelope: Envelope) -> Result<Flow, String> {
        let (instance, event, reply) = envelope.into_parts();
        let kind = event.kind();
        debug!(%instance, %kind, "dispatching");
        self.events.push(BridgeEvent::Dispatched { instance, kind });

        if kind == EventKind::Shutdown {
            self.destroy_all();
            if let Some(slot) = reply {
                slot.post(Ok(Response::Ack));
            }
            return Ok(Flow::Exit);
        }

        let has_reply = reply.is_some();
        match self.apply(instance, event) {
            Ok(response) => {
                if let Some(slot) = reply {
                    slot.post(Ok(response));
                }
                Ok(Flow::Continue)
            }
            Err(DispatchError::Bridge(err)) => {
                self.record_failure(instance, kind, &err, has_reply);
                if let Some(slot) = reply {
                    slot.post(Err(err));
                }
                Ok(Flow::Continue)
            }
            Err(DispatchError::Fatal(reason)) => {
                if let Some(slot) = reply {
                    slot.post(Err(BridgeError::BridgeShutdown));
                }
                Err(reason)
            }
        }
    }

    fn record_failure(
        &self,
        instance: InstanceId,
        kind: EventKind,
        err: &BridgeError,
        has_reply: bool,
    ) {
        let rejected = matches!(
            err,
            BridgeError::InstanceNotFound(_)
                | BridgeError::InvalidState { .. }
                | BridgeError::DuplicateInstance(_)
        );
        if has_reply {
            debug!(%instance, %kind, error = %err, "request failed");
        } else {
            warn!(%instance, %kind, error = %err, "envelope dropped");
        }
        let event = if rejected {
            BridgeEvent::Rejected {
                instance,
                kind,
                error: err.clone(),
            }
        } else {
            BridgeEvent::Failed {
                instance,
                kind,
                error: err.clone(),
            }
        };
        self.events.push(event);
    }

    /// Move an instance to `next` and record the change.
    fn transition(&mut self, instance: InstanceId, next: InstanceState) -> Result<(), BridgeError> {
        let from = self.registry.transition(instance, next)?;
        self.events.push(BridgeEvent::StateChanged {
            instance,
            from,
            to: next,
        });
        Ok(())
    }

    /// Destroy every registered instance in registry order.
    fn destroy_all(&mut self) {
        for instance in self.registry.ids() {
            match self.destroy_window(instance) {
                Ok(_) => {}
                Err(DispatchError::Bridge(err)) => {
                    warn!(%instance, error = %err, "destroy during shutdown failed");
                }
                Err(DispatchError::Fatal(reason)) => {
                    error!(%instance, reason = %reason, "native fault during shutdown, abandoning handles");
                    self.events.push(BridgeEvent::Fatal { reason });
                    return;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &InstanceRegistry<T::Handle> {
        &self.registry
    }
}

/// Record a fatal fault and fail every envelope still queued. Requests that
/// race in after this drain see their slot dropped together with the
/// receiver, which reads the same way.
pub(crate) fn abandon(reason: &str, events: &EventSink, queue: &QueueReceiver) {
    error!(reason = %reason, "native subsystem fault, stopping dispatch");
    events.push(BridgeEvent::Fatal {
        reason: reason.to_string(),
    });
    let mut discarded = 0usize;
    while let Some(envelope) = queue.try_dequeue() {
        let (_, _, reply) = envelope.into_parts();
        if let Some(slot) = reply {
            slot.post(Err(BridgeError::BridgeShutdown));
        }
        discarded += 1;
    }
    if discarded > 0 {
        warn!(discarded, "discarded queued envelopes after fault");
    }
}

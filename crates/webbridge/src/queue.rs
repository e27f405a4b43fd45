//! The ordered, multi-producer single-consumer event queue.

use std::sync::mpsc;
use webbridge_common::BridgeError;

use crate::envelope::Envelope;

/// Create a connected producer/consumer pair.
pub fn channel() -> (EventQueue, QueueReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventQueue { tx }, QueueReceiver { rx })
}

/// Producer side. Cheap to clone; every clone feeds the same FIFO.
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<Envelope>,
}

impl EventQueue {
    /// Append an envelope. Never blocks. Fails once the consumer is gone,
    /// in which case the envelope (and any reply slot) is dropped.
    pub fn enqueue(&self, envelope: Envelope) -> Result<(), BridgeError> {
        self.tx
            .send(envelope)
            .map_err(|_| BridgeError::BridgeShutdown)
    }
}

/// Consumer side, owned by the dispatch thread.
#[derive(Debug)]
pub struct QueueReceiver {
    rx: mpsc::Receiver<Envelope>,
}

impl QueueReceiver {
    /// Block until the next envelope. `None` once every producer is gone
    /// and the queue is empty.
    pub fn dequeue(&self) -> Option<Envelope> {
        self.rx.recv().ok()
    }

    /// Take the next envelope if one is already queued.
    pub fn try_dequeue(&self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }
}

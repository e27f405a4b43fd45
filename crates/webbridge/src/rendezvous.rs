//! One-shot result slots for request/response envelopes.
//!
//! The dispatch thread posts exactly one reply into a capacity-one channel;
//! the caller blocks on the other end. A slot dropped without a reply (the
//! dispatch thread died or discarded the envelope) reads as shutdown.

use std::sync::mpsc;
use tracing::trace;
use webbridge_common::BridgeError;

/// Successful outcome of a request/response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The native window exists and the instance is active.
    Created,
    /// Current URL of the instance.
    Url(String),
    /// The operation completed with nothing to report.
    Ack,
}

pub type Reply = Result<Response, BridgeError>;

/// Dispatch-thread end of a rendezvous.
#[derive(Debug)]
pub struct ReplySlot {
    tx: mpsc::SyncSender<Reply>,
}

/// Caller end of a rendezvous.
#[derive(Debug)]
pub struct ReplyReceiver {
    rx: mpsc::Receiver<Reply>,
}

pub(crate) fn slot() -> (ReplySlot, ReplyReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (ReplySlot { tx }, ReplyReceiver { rx })
}

impl ReplySlot {
    /// Resolve the slot. Never blocks: the channel has room for exactly
    /// this one reply.
    pub fn post(self, reply: Reply) {
        if self.tx.try_send(reply).is_err() {
            trace!("reply dropped, caller no longer waiting");
        }
    }
}

impl ReplyReceiver {
    /// Block until the dispatch thread resolves the slot.
    pub fn wait(self) -> Reply {
        self.rx.recv().unwrap_or(Err(BridgeError::BridgeShutdown))
    }
}

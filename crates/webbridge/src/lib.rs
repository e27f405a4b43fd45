//! Native event bridge for embedding a platform browser control.
//!
//! Provides:
//! - A `Send + Sync` facade ([`Bridge`]) callable from any thread
//! - A single dispatch thread that owns the toolkit and every native handle
//! - Fire-and-forget and request/response operations over one FIFO queue
//! - Per-instance lifecycle tracking with state-checked dispatch
//! - Diagnostic events describing what the dispatch thread did

pub mod bridge;
pub mod dispatch;
pub mod envelope;
pub mod events;
pub mod native;
pub mod queue;
pub mod registry;
pub mod rendezvous;

pub use bridge::{Bridge, BridgeOptions};
pub use dispatch::DispatchSettings;
pub use envelope::{Envelope, EventKind, NativeEvent, Payload, PayloadShape, BRIDGE_INSTANCE};
pub use events::{BridgeEvent, EventSink};
pub use native::{NativeError, NativeToolkit, NavigationRequest};
pub use registry::{InstanceEntry, InstanceRegistry};
pub use rendezvous::{Reply, Response};

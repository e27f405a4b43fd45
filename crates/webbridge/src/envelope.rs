//! Event envelopes: one native operation addressed to one instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use webbridge_common::{BridgeError, InstanceId, Rect};

use crate::rendezvous::{self, ReplyReceiver, ReplySlot};

/// Target used by bridge-wide events (`Init`, `Shutdown`). Never handed out
/// to an instance.
pub const BRIDGE_INSTANCE: InstanceId = InstanceId(0);

/// Discriminant of a [`NativeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Init,
    CreateWindow,
    DestroyWindow,
    Shutdown,
    SetBounds,
    Navigate,
    NavigatePost,
    NavigatePostData,
    GoBack,
    GoForward,
    Refresh,
    Stop,
    GetUrl,
    FocusGained,
    FocusLost,
}

/// Payload shape carried by each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    None,
    Rect,
    Text,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Init => "Init",
            EventKind::CreateWindow => "CreateWindow",
            EventKind::DestroyWindow => "DestroyWindow",
            EventKind::Shutdown => "Shutdown",
            EventKind::SetBounds => "SetBounds",
            EventKind::Navigate => "Navigate",
            EventKind::NavigatePost => "NavigatePost",
            EventKind::NavigatePostData => "NavigatePostData",
            EventKind::GoBack => "GoBack",
            EventKind::GoForward => "GoForward",
            EventKind::Refresh => "Refresh",
            EventKind::Stop => "Stop",
            EventKind::GetUrl => "GetUrl",
            EventKind::FocusGained => "FocusGained",
            EventKind::FocusLost => "FocusLost",
        }
    }

    pub fn payload_shape(self) -> PayloadShape {
        match self {
            EventKind::SetBounds => PayloadShape::Rect,
            EventKind::Navigate | EventKind::NavigatePost | EventKind::NavigatePostData => {
                PayloadShape::Text
            }
            _ => PayloadShape::None,
        }
    }

    /// Kinds whose caller blocks on a rendezvous slot.
    pub fn expects_reply(self) -> bool {
        matches!(
            self,
            EventKind::CreateWindow | EventKind::GetUrl | EventKind::Shutdown
        )
    }

    /// Kinds that may only act on an `Active` instance.
    pub fn requires_active(self) -> bool {
        !matches!(
            self,
            EventKind::Init
                | EventKind::CreateWindow
                | EventKind::DestroyWindow
                | EventKind::Shutdown
                | EventKind::GetUrl
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loose payload used when a kind is chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Rect(Rect),
    Text(String),
}

/// A native operation. The payload is part of the variant, so a kind can
/// never carry the wrong payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeEvent {
    Init,
    CreateWindow,
    DestroyWindow,
    Shutdown,
    SetBounds(Rect),
    Navigate(String),
    /// Navigate to the URL, POSTing whatever body was staged by
    /// `NavigatePostData`.
    NavigatePost(String),
    /// Stage a POST body for the next `NavigatePost` on the same instance.
    NavigatePostData(String),
    GoBack,
    GoForward,
    Refresh,
    Stop,
    GetUrl,
    FocusGained,
    FocusLost,
}

impl NativeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NativeEvent::Init => EventKind::Init,
            NativeEvent::CreateWindow => EventKind::CreateWindow,
            NativeEvent::DestroyWindow => EventKind::DestroyWindow,
            NativeEvent::Shutdown => EventKind::Shutdown,
            NativeEvent::SetBounds(_) => EventKind::SetBounds,
            NativeEvent::Navigate(_) => EventKind::Navigate,
            NativeEvent::NavigatePost(_) => EventKind::NavigatePost,
            NativeEvent::NavigatePostData(_) => EventKind::NavigatePostData,
            NativeEvent::GoBack => EventKind::GoBack,
            NativeEvent::GoForward => EventKind::GoForward,
            NativeEvent::Refresh => EventKind::Refresh,
            NativeEvent::Stop => EventKind::Stop,
            NativeEvent::GetUrl => EventKind::GetUrl,
            NativeEvent::FocusGained => EventKind::FocusGained,
            NativeEvent::FocusLost => EventKind::FocusLost,
        }
    }

    /// Build an event from a runtime kind and payload, rejecting a payload
    /// whose shape does not match the kind.
    pub fn from_parts(kind: EventKind, payload: Payload) -> Result<Self, BridgeError> {
        let event = match kind {
            EventKind::Init => payload.into_none(kind).map(|()| NativeEvent::Init)?,
            EventKind::CreateWindow => payload.into_none(kind).map(|()| NativeEvent::CreateWindow)?,
            EventKind::DestroyWindow => {
                payload.into_none(kind).map(|()| NativeEvent::DestroyWindow)?
            }
            EventKind::Shutdown => payload.into_none(kind).map(|()| NativeEvent::Shutdown)?,
            EventKind::SetBounds => NativeEvent::SetBounds(payload.into_rect(kind)?),
            EventKind::Navigate => NativeEvent::Navigate(payload.into_text(kind)?),
            EventKind::NavigatePost => NativeEvent::NavigatePost(payload.into_text(kind)?),
            EventKind::NavigatePostData => NativeEvent::NavigatePostData(payload.into_text(kind)?),
            EventKind::GoBack => payload.into_none(kind).map(|()| NativeEvent::GoBack)?,
            EventKind::GoForward => payload.into_none(kind).map(|()| NativeEvent::GoForward)?,
            EventKind::Refresh => payload.into_none(kind).map(|()| NativeEvent::Refresh)?,
            EventKind::Stop => payload.into_none(kind).map(|()| NativeEvent::Stop)?,
            EventKind::GetUrl => payload.into_none(kind).map(|()| NativeEvent::GetUrl)?,
            EventKind::FocusGained => payload.into_none(kind).map(|()| NativeEvent::FocusGained)?,
            EventKind::FocusLost => payload.into_none(kind).map(|()| NativeEvent::FocusLost)?,
        };
        Ok(event)
    }
}

impl Payload {
    fn into_none(self, kind: EventKind) -> Result<(), BridgeError> {
        match self {
            Payload::None => Ok(()),
            other => Err(other.mismatch(kind)),
        }
    }

    fn into_rect(self, kind: EventKind) -> Result<Rect, BridgeError> {
        match self {
            Payload::Rect(rect) => Ok(rect),
            other => Err(other.mismatch(kind)),
        }
    }

    fn into_text(self, kind: EventKind) -> Result<String, BridgeError> {
        match self {
            Payload::Text(text) => Ok(text),
            other => Err(other.mismatch(kind)),
        }
    }

    fn mismatch(self, kind: EventKind) -> BridgeError {
        BridgeError::InvalidArgument(format!(
            "{kind} expects a {:?} payload, got {self:?}",
            kind.payload_shape()
        ))
    }
}

/// One unit of work for the dispatch thread. Consumed exactly once.
#[derive(Debug)]
pub struct Envelope {
    instance: InstanceId,
    event: NativeEvent,
    reply: Option<ReplySlot>,
}

impl Envelope {
    /// A fire-and-forget envelope.
    pub fn new(instance: InstanceId, event: NativeEvent) -> Self {
        Self {
            instance,
            event,
            reply: None,
        }
    }

    /// An envelope whose result is posted back to the returned receiver.
    pub fn with_reply(instance: InstanceId, event: NativeEvent) -> (Self, ReplyReceiver) {
        let (slot, receiver) = rendezvous::slot();
        let envelope = Self {
            instance,
            event,
            reply: Some(slot),
        };
        (envelope, receiver)
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn event(&self) -> &NativeEvent {
        &self.event
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    pub fn has_reply(&self) -> bool {
        self.reply.is_some()
    }

    pub(crate) fn into_parts(self) -> (InstanceId, NativeEvent, Option<ReplySlot>) {
        (self.instance, self.event, self.reply)
    }
}

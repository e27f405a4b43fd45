use serde::{Deserialize, Serialize};
use std::fmt;

/// Window-relative geometry in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect is usable as native bounds when neither dimension is negative.
    pub fn has_valid_size(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }
}

/// Logical identifier of one embedded browser instance. Distinct from the
/// native handle, which never leaves the dispatch thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance-{}", self.0)
    }
}

/// Lifecycle of a browser instance as seen by the dispatch thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Uninitialized,
    Created,
    Active,
    Navigating,
    Destroyed,
}

impl InstanceState {
    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: InstanceState) -> bool {
        use InstanceState::*;
        matches!(
            (self, next),
            (Uninitialized, Created)
                | (Created, Active)
                | (Active, Navigating)
                | (Navigating, Active)
                | (Uninitialized | Created | Active | Navigating, Destroyed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == InstanceState::Destroyed
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstanceState::Uninitialized => "uninitialized",
            InstanceState::Created => "created",
            InstanceState::Active => "active",
            InstanceState::Navigating => "navigating",
            InstanceState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

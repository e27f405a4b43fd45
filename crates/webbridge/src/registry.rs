use std::collections::BTreeMap;

use webbridge_common::{BridgeError, InstanceId, InstanceState};

/// One live browser instance as tracked by the dispatch thread.
#[derive(Debug)]
pub struct InstanceEntry<H> {
    id: InstanceId,
    handle: Option<H>,
    state: InstanceState,
    /// POST body waiting for the next `NavigatePost`.
    staged_post_data: Option<String>,
}

impl<H> InstanceEntry<H> {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    pub fn attach(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    pub fn take_handle(&mut self) -> Option<H> {
        self.handle.take()
    }

    pub fn stage_post_data(&mut self, body: String) {
        self.staged_post_data = Some(body);
    }

    pub fn take_post_data(&mut self) -> Option<String> {
        self.staged_post_data.take()
    }
}

/// Maps instance ids to native handles and lifecycle state. Owned and
/// mutated only by the dispatch thread.
#[derive(Debug)]
pub struct InstanceRegistry<H> {
    entries: BTreeMap<InstanceId, InstanceEntry<H>>,
}

impl<H> InstanceRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Allocate an `Uninitialized` entry with no handle yet.
    pub fn register(&mut self, id: InstanceId) -> Result<&mut InstanceEntry<H>, BridgeError> {
        if self.entries.contains_key(&id) {
            return Err(BridgeError::DuplicateInstance(id));
        }
        Ok(self.entries.entry(id).or_insert(InstanceEntry {
            id,
            handle: None,
            state: InstanceState::Uninitialized,
            staged_post_data: None,
        }))
    }

    /// Find a live entry. Destroyed entries count as absent.
    pub fn lookup(&self, id: InstanceId) -> Result<&InstanceEntry<H>, BridgeError> {
        self.entries
            .get(&id)
            .filter(|e| !e.state.is_terminal())
            .ok_or(BridgeError::InstanceNotFound(id))
    }

    pub fn lookup_mut(&mut self, id: InstanceId) -> Result<&mut InstanceEntry<H>, BridgeError> {
        self.entries
            .get_mut(&id)
            .filter(|e| !e.state.is_terminal())
            .ok_or(BridgeError::InstanceNotFound(id))
    }

    /// Move an instance to `next`, returning the previous state.
    pub fn transition(
        &mut self,
        id: InstanceId,
        next: InstanceState,
    ) -> Result<InstanceState, BridgeError> {
        let entry = self.lookup_mut(id)?;
        let prev = entry.state;
        if !prev.can_transition_to(next) {
            return Err(BridgeError::InvalidState {
                instance: id,
                state: prev,
                kind: transition_label(next),
            });
        }
        entry.state = next;
        Ok(prev)
    }

    /// Remove an entry, returning it so the caller can release its handle.
    pub fn unregister(&mut self, id: InstanceId) -> Option<InstanceEntry<H>> {
        self.entries.remove(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<InstanceId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn transition_label(next: InstanceState) -> &'static str {
    match next {
        InstanceState::Uninitialized => "reset",
        InstanceState::Created => "create",
        InstanceState::Active => "activate",
        InstanceState::Navigating => "navigate",
        InstanceState::Destroyed => "destroy",
    }
}

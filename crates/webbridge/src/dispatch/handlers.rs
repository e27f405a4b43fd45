use tracing::{debug, info, warn};
use webbridge_common::{BridgeError, InstanceId, InstanceState};

use crate::envelope::{EventKind, NativeEvent};
use crate::events::BridgeEvent;
use crate::native::{NativeToolkit, NavigationRequest};
use crate::registry::InstanceRegistry;
use crate::rendezvous::Response;

use super::{DispatchError, Dispatcher};

// =============================================================================
// PER-KIND HANDLING
// =============================================================================

impl<T: NativeToolkit> Dispatcher<T> {
    /// Perform one event against the toolkit. `Shutdown` is handled by the
    /// caller because it ends the loop.
    pub(super) fn apply(
        &mut self,
        instance: InstanceId,
        event: NativeEvent,
    ) -> Result<Response, DispatchError> {
        let kind = event.kind();
        match event {
            NativeEvent::Init => self.init(),
            NativeEvent::CreateWindow => self.create_window(instance),
            NativeEvent::DestroyWindow => self.destroy_window(instance),
            NativeEvent::Shutdown => Ok(Response::Ack),
            NativeEvent::SetBounds(bounds) => {
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit
                    .set_bounds(handle, bounds)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
            NativeEvent::Navigate(url) => self.navigate(instance, kind, url, None),
            NativeEvent::NavigatePostData(body) => {
                active_handle(&mut self.registry, instance, kind)?;
                self.registry.lookup_mut(instance)?.stage_post_data(body);
                Ok(Response::Ack)
            }
            NativeEvent::NavigatePost(url) => {
                let body = self.registry.lookup_mut(instance)?.take_post_data();
                self.navigate(instance, kind, url, body)
            }
            NativeEvent::GoBack => {
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit
                    .go_back(handle)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
            NativeEvent::GoForward => {
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit
                    .go_forward(handle)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
            NativeEvent::Refresh => {
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit
                    .refresh(handle)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
            NativeEvent::Stop => {
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit.stop(handle).map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
            NativeEvent::GetUrl => {
                let handle = self
                    .registry
                    .lookup(instance)?
                    .handle()
                    .ok_or(BridgeError::InstanceNotFound(instance))?;
                let url = self
                    .toolkit
                    .current_url(handle)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Url(url))
            }
            NativeEvent::FocusGained | NativeEvent::FocusLost => {
                let focused = kind == EventKind::FocusGained;
                let handle = active_handle(&mut self.registry, instance, kind)?;
                self.toolkit
                    .set_focus(handle, focused)
                    .map_err(DispatchError::from_native)?;
                Ok(Response::Ack)
            }
        }
    }

    /// Any failure to initialize counts as a native-subsystem fault.
    fn init(&mut self) -> Result<Response, DispatchError> {
        if self.initialized {
            debug!("native toolkit already initialized");
            return Ok(Response::Ack);
        }
        self.toolkit
            .init()
            .map_err(|e| DispatchError::Fatal(format!("toolkit init failed: {e}")))?;
        self.initialized = true;
        info!("native toolkit initialized");
        Ok(Response::Ack)
    }

    fn create_window(&mut self, instance: InstanceId) -> Result<Response, DispatchError> {
        self.registry.register(instance)?;
        let handle = match self.toolkit.create_window(self.settings.initial_bounds) {
            Ok(handle) => handle,
            Err(e) => {
                self.registry.unregister(instance);
                return Err(DispatchError::from_native_create(e));
            }
        };
        self.registry.lookup_mut(instance)?.attach(handle);
        self.transition(instance, InstanceState::Created)?;
        self.transition(instance, InstanceState::Active)?;
        self.events.push(BridgeEvent::Created { instance });
        info!(%instance, "native window created");
        Ok(Response::Created)
    }

    /// Tear down one instance. The entry leaves the registry even if the
    /// toolkit reports an error, since the handle has been consumed.
    pub(super) fn destroy_window(&mut self, instance: InstanceId) -> Result<Response, DispatchError> {
        self.transition(instance, InstanceState::Destroyed)?;
        let handle = self
            .registry
            .unregister(instance)
            .and_then(|mut entry| entry.take_handle());
        self.events.push(BridgeEvent::Destroyed { instance });
        info!(%instance, "native window destroyed");
        match handle {
            Some(handle) => self
                .toolkit
                .destroy_window(handle)
                .map(|()| Response::Ack)
                .map_err(DispatchError::from_native),
            None => Ok(Response::Ack),
        }
    }

    /// Navigate inside the transient `Navigating` state, returning to
    /// `Active` whatever the toolkit reports.
    fn navigate(
        &mut self,
        instance: InstanceId,
        kind: EventKind,
        url: String,
        post_data: Option<String>,
    ) -> Result<Response, DispatchError> {
        active_handle(&mut self.registry, instance, kind)?;
        if !self.settings.navigation.is_allowed(&url) {
            warn!(%instance, url = %url, "navigation blocked by allowlist");
            return Err(BridgeError::NativeOperation(format!(
                "navigation to {url} blocked by allowlist"
            ))
            .into());
        }

        self.transition(instance, InstanceState::Navigating)?;
        let request = match post_data.as_deref() {
            Some(body) => NavigationRequest::post(&url, body),
            None => NavigationRequest::get(&url),
        };
        let result = match self
            .registry
            .lookup_mut(instance)?
            .handle_mut()
        {
            Some(handle) => self.toolkit.navigate(handle, request),
            None => Ok(()),
        };
        self.transition(instance, InstanceState::Active)?;

        result.map_err(DispatchError::from_native)?;
        debug!(%instance, url = %url, post = post_data.is_some(), "navigated");
        self.events.push(BridgeEvent::Navigated { instance, url });
        Ok(Response::Ack)
    }
}

/// Resolve the native handle of an `Active` instance.
fn active_handle<H>(
    registry: &mut InstanceRegistry<H>,
    instance: InstanceId,
    kind: EventKind,
) -> Result<&mut H, BridgeError> {
    let entry = registry.lookup_mut(instance)?;
    let state = entry.state();
    if kind.requires_active() && state != InstanceState::Active {
        return Err(BridgeError::InvalidState {
            instance,
            state,
            kind: kind.name(),
        });
    }
    entry
        .handle_mut()
        .ok_or(BridgeError::InstanceNotFound(instance))
}

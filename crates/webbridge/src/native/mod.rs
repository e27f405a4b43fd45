//! The native toolkit seam.
//!
//! A [`NativeToolkit`] is the capability set of the platform browser
//! control. It is only ever touched from the dispatch thread, so it does
//! not need to be `Send`; the bridge builds it on that thread from a
//! factory closure.

pub mod headless;
#[cfg(feature = "wry")]
pub mod wry_backend;

pub use headless::{CallJournal, FaultPlan, HeadlessPage, HeadlessToolkit, NativeCall};
#[cfg(feature = "wry")]
pub use wry_backend::{WryPage, WryToolkit};

use webbridge_common::Rect;

/// Failure reported by a toolkit call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    /// The call failed but the toolkit is still usable.
    #[error("{0}")]
    Operation(String),

    /// The native subsystem is broken; the bridge must stop.
    #[error("fatal native fault: {0}")]
    Fatal(String),
}

impl NativeError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, NativeError::Fatal(_))
    }
}

/// A navigation, optionally submitted as a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest<'a> {
    pub url: &'a str,
    /// URL-encoded form body. `None` means a plain GET.
    pub post_data: Option<&'a str>,
}

impl<'a> NavigationRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            url,
            post_data: None,
        }
    }

    pub fn post(url: &'a str, body: &'a str) -> Self {
        Self {
            url,
            post_data: Some(body),
        }
    }
}

/// Capability set of a platform browser control.
pub trait NativeToolkit {
    /// Opaque reference to one native window/control.
    type Handle;

    /// Bring up the native subsystem. Any error here is fatal.
    fn init(&mut self) -> Result<(), NativeError> {
        Ok(())
    }

    fn create_window(&mut self, bounds: Rect) -> Result<Self::Handle, NativeError>;

    fn destroy_window(&mut self, handle: Self::Handle) -> Result<(), NativeError>;

    fn set_bounds(&mut self, handle: &mut Self::Handle, bounds: Rect) -> Result<(), NativeError>;

    fn navigate(
        &mut self,
        handle: &mut Self::Handle,
        request: NavigationRequest<'_>,
    ) -> Result<(), NativeError>;

    fn go_back(&mut self, handle: &mut Self::Handle) -> Result<(), NativeError>;

    fn go_forward(&mut self, handle: &mut Self::Handle) -> Result<(), NativeError>;

    fn refresh(&mut self, handle: &mut Self::Handle) -> Result<(), NativeError>;

    fn stop(&mut self, handle: &mut Self::Handle) -> Result<(), NativeError>;

    fn current_url(&mut self, handle: &Self::Handle) -> Result<String, NativeError>;

    fn set_focus(&mut self, handle: &mut Self::Handle, focused: bool) -> Result<(), NativeError>;
}

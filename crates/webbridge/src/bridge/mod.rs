//! The bridge facade: the API callers on any thread use.
//!
//! Every call turns into one or two envelopes on the shared queue. Calls
//! that need an answer (`create_instance`, `get_url`, `shutdown`) block on
//! a rendezvous slot until the dispatch thread posts the result; everything
//! else returns as soon as the envelope is queued.

mod validate;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};
use webbridge_common::{BridgeError, InstanceId, InstanceIdAllocator, Rect};
use webbridge_config::BridgeConfig;

use crate::dispatch::{self, DispatchSettings, Dispatcher};
use crate::envelope::{Envelope, NativeEvent, BRIDGE_INSTANCE};
use crate::events::{BridgeEvent, EventSink};
use crate::native::{NativeError, NativeToolkit};
use crate::queue::{self, EventQueue};
use crate::rendezvous::Response;

/// How to start a bridge.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// Name of the dispatch thread.
    pub thread_name: String,
    pub settings: DispatchSettings,
}

impl BridgeOptions {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            thread_name: config.dispatch.thread_name.clone(),
            settings: DispatchSettings {
                initial_bounds: config.webview.bounds.into(),
                navigation: config.navigation.clone(),
            },
        }
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

/// Handle to a running native dispatch thread.
///
/// `Send + Sync`: share it through an `Arc` to drive instances from many
/// threads. Dropping the last handle shuts the bridge down.
#[derive(Debug)]
pub struct Bridge {
    queue: EventQueue,
    ids: InstanceIdAllocator,
    events: EventSink,
    worker: Mutex<Option<JoinHandle<()>>>,
    shut_down: AtomicBool,
    /// Keeps a post body and its URL adjacent in the queue.
    post_lock: Mutex<()>,
}

impl Bridge {
    /// Start the dispatch thread. `factory` runs on that thread, so the
    /// toolkit never crosses threads. Initialization is queued ahead of any
    /// caller envelope; if it fails the bridge is dead and every later call
    /// fails with `BridgeShutdown`.
    pub fn spawn<T, F>(options: BridgeOptions, factory: F) -> Result<Self, BridgeError>
    where
        T: NativeToolkit + 'static,
        F: FnOnce() -> Result<T, NativeError> + Send + 'static,
    {
        validate::thread_name(&options.thread_name)?;
        let (queue, receiver) = queue::channel();
        let events = EventSink::default();
        let sink = events.clone();
        let settings = options.settings;

        let worker = thread::Builder::new()
            .name(options.thread_name.clone())
            .spawn(move || match factory() {
                Ok(toolkit) => Dispatcher::new(toolkit, settings, sink).run(receiver),
                Err(e) => {
                    dispatch::abandon(&format!("toolkit construction failed: {e}"), &sink, &receiver)
                }
            })
            .map_err(|e| {
                BridgeError::NativeOperation(format!("failed to spawn dispatch thread: {e}"))
            })?;

        if queue
            .enqueue(Envelope::new(BRIDGE_INSTANCE, NativeEvent::Init))
            .is_err()
        {
            warn!("dispatch thread exited before initialization");
        }
        info!(thread = %options.thread_name, "bridge started");

        Ok(Self {
            queue,
            ids: InstanceIdAllocator::default(),
            events,
            worker: Mutex::new(Some(worker)),
            shut_down: AtomicBool::new(false),
            post_lock: Mutex::new(()),
        })
    }

    /// Create a native window and return its id once it is active.
    pub fn create_instance(&self) -> Result<InstanceId, BridgeError> {
        self.ensure_open()?;
        let id = self
            .ids
            .allocate()
            .ok_or_else(|| BridgeError::NativeCreation("instance ids exhausted".into()))?;
        match self.request(id, NativeEvent::CreateWindow)? {
            Response::Created => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    /// Queue destruction of an instance. Unknown ids are logged by the
    /// dispatch thread.
    pub fn destroy_instance(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::DestroyWindow)
    }

    pub fn set_bounds(&self, id: InstanceId, bounds: Rect) -> Result<(), BridgeError> {
        validate::instance(id)?;
        validate::bounds(&bounds)?;
        self.send(id, NativeEvent::SetBounds(bounds))
    }

    pub fn navigate(&self, id: InstanceId, url: &str) -> Result<(), BridgeError> {
        validate::instance(id)?;
        validate::url(url)?;
        self.send(id, NativeEvent::Navigate(url.to_string()))
    }

    /// Navigate with `data` as the POST body. The body is staged on the
    /// instance first, then consumed by the navigation.
    pub fn navigate_post(&self, id: InstanceId, url: &str, data: &str) -> Result<(), BridgeError> {
        validate::instance(id)?;
        validate::url(url)?;
        self.ensure_open()?;

        let _adjacent = self.post_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.queue
            .enqueue(Envelope::new(id, NativeEvent::NavigatePostData(data.to_string())))?;
        self.queue
            .enqueue(Envelope::new(id, NativeEvent::NavigatePost(url.to_string())))
    }

    pub fn go_back(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::GoBack)
    }

    pub fn go_forward(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::GoForward)
    }

    pub fn refresh(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::Refresh)
    }

    pub fn stop(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::Stop)
    }

    pub fn focus_gained(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::FocusGained)
    }

    pub fn focus_lost(&self, id: InstanceId) -> Result<(), BridgeError> {
        validate::instance(id)?;
        self.send(id, NativeEvent::FocusLost)
    }

    /// Current URL of an instance, as reported by the native control.
    pub fn get_url(&self, id: InstanceId) -> Result<String, BridgeError> {
        validate::instance(id)?;
        match self.request(id, NativeEvent::GetUrl)? {
            Response::Url(url) => Ok(url),
            other => Err(unexpected(other)),
        }
    }

    /// Destroy every instance, stop the dispatch thread and wait for it.
    /// Only the first call does anything; later calls and every other
    /// operation fail with `BridgeShutdown`.
    pub fn shutdown(&self) -> Result<(), BridgeError> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Err(BridgeError::BridgeShutdown);
        }
        let (envelope, reply) = Envelope::with_reply(BRIDGE_INSTANCE, NativeEvent::Shutdown);
        let result = self.queue.enqueue(envelope).and_then(|()| reply.wait());
        self.join_worker();
        match result {
            Ok(_) => {
                info!("bridge shut down");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "bridge was already stopped");
                Err(e)
            }
        }
    }

    /// Whether the dispatch thread is still accepting envelopes.
    pub fn is_running(&self) -> bool {
        if self.shut_down.load(Ordering::SeqCst) {
            return false;
        }
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Take every diagnostic event recorded since the last drain.
    pub fn drain_events(&self) -> Vec<BridgeEvent> {
        self.events.drain()
    }

    fn ensure_open(&self) -> Result<(), BridgeError> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(BridgeError::BridgeShutdown);
        }
        Ok(())
    }

    fn send(&self, id: InstanceId, event: NativeEvent) -> Result<(), BridgeError> {
        self.ensure_open()?;
        self.queue.enqueue(Envelope::new(id, event))
    }

    fn request(&self, id: InstanceId, event: NativeEvent) -> Result<Response, BridgeError> {
        self.ensure_open()?;
        let (envelope, reply) = Envelope::with_reply(id, event);
        self.queue.enqueue(envelope)?;
        reply.wait()
    }

    fn join_worker(&self) {
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                error!("dispatch thread panicked");
            }
        }
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if !self.shut_down.load(Ordering::SeqCst) {
            let _ = self.shutdown();
        }
    }
}

fn unexpected(response: Response) -> BridgeError {
    BridgeError::NativeOperation(format!("unexpected reply from dispatch thread: {response:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::HeadlessToolkit;
    use webbridge_config::WebViewConfig;

    fn bridge() -> Bridge {
        Bridge::spawn(BridgeOptions::default(), || {
            Ok(HeadlessToolkit::new(WebViewConfig::default()))
        })
        .unwrap()
    }

    #[test]
    fn options_follow_config() {
        let mut config = BridgeConfig::default();
        config.dispatch.thread_name = "bridge-test".into();
        config.webview.bounds.width = 320;
        let options = BridgeOptions::from_config(&config);
        assert_eq!(options.thread_name, "bridge-test");
        assert_eq!(options.settings.initial_bounds, Rect::new(0, 0, 320, 600));
    }

    #[test]
    fn bridge_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bridge>();
    }

    #[test]
    fn ids_start_at_one() {
        let bridge = bridge();
        assert_eq!(bridge.create_instance().unwrap(), InstanceId(1));
        assert_eq!(bridge.create_instance().unwrap(), InstanceId(2));
        bridge.shutdown().unwrap();
    }

    #[test]
    fn reserved_id_is_rejected_without_queueing() {
        let bridge = bridge();
        let err = bridge.navigate(BRIDGE_INSTANCE, "about:blank").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
        bridge.shutdown().unwrap();
    }

    #[test]
    fn thread_name_with_nul_is_rejected() {
        let options = BridgeOptions {
            thread_name: "bad\0name".into(),
            ..BridgeOptions::default()
        };
        let result = std::panic::catch_unwind(|| {
            Bridge::spawn(options, || Ok(HeadlessToolkit::new(WebViewConfig::default())))
        });
        let err = result.expect("spawn must not panic").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }

    #[test]
    fn exhausted_ids_fail_creation() {
        let mut bridge = bridge();
        bridge.ids = InstanceIdAllocator::starting_at(u32::MAX - 1);
        assert_eq!(bridge.create_instance().unwrap(), InstanceId(u32::MAX - 1));
        assert!(matches!(
            bridge.create_instance(),
            Err(BridgeError::NativeCreation(_))
        ));
        bridge.shutdown().unwrap();
    }

    #[test]
    fn second_shutdown_fails() {
        let bridge = bridge();
        assert!(bridge.is_running());
        bridge.shutdown().unwrap();
        assert!(!bridge.is_running());
        assert_eq!(bridge.shutdown(), Err(BridgeError::BridgeShutdown));
    }

    #[test]
    fn spawn_uses_thread_name() {
        let options = BridgeOptions {
            thread_name: "named-dispatch".into(),
            ..BridgeOptions::default()
        };
        let (tx, rx) = std::sync::mpsc::channel();
        let bridge = Bridge::spawn(options, move || {
            let _ = tx.send(thread::current().name().map(str::to_string));
            Ok(HeadlessToolkit::new(WebViewConfig::default()))
        })
        .unwrap();
        assert_eq!(rx.recv().unwrap().as_deref(), Some("named-dispatch"));
        drop(bridge);
    }
}

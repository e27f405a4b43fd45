//! In-memory toolkit with no windowing system behind it.
//!
//! Each page keeps a linear history like a real browser, and every call is
//! appended to a shared [`CallJournal`] so callers on other threads can see
//! exactly what reached the "native" side and in which order.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;
use webbridge_common::Rect;
use webbridge_config::WebViewConfig;

use super::{NativeError, NativeToolkit, NavigationRequest};

/// One call that reached the toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum NativeCall {
    Init,
    CreateWindow {
        handle: u64,
        bounds: Rect,
    },
    DestroyWindow {
        handle: u64,
    },
    SetBounds {
        handle: u64,
        bounds: Rect,
    },
    Navigate {
        handle: u64,
        url: String,
        post_data: Option<String>,
    },
    GoBack {
        handle: u64,
    },
    GoForward {
        handle: u64,
    },
    Refresh {
        handle: u64,
    },
    Stop {
        handle: u64,
    },
    CurrentUrl {
        handle: u64,
    },
    SetFocus {
        handle: u64,
        focused: bool,
    },
}

/// Shared, append-only record of toolkit calls.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<NativeCall>>>,
}

impl CallJournal {
    fn record(&self, call: NativeCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Copy of every call so far.
    pub fn snapshot(&self) -> Vec<NativeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Failures to inject.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// `init` reports a fatal fault.
    pub fail_init: bool,
    /// `create_window` fails with an operation error.
    pub fail_create: bool,
    /// URL schemes (without `:`) whose navigation fails.
    pub rejected_schemes: Vec<String>,
    /// Navigating to exactly this URL is a fatal fault.
    pub fatal_url: Option<String>,
}

/// Native state of one headless page.
#[derive(Debug)]
pub struct HeadlessPage {
    id: u64,
    history: Vec<String>,
    cursor: usize,
    bounds: Rect,
    focused: bool,
    loading: bool,
    last_post: Option<String>,
}

impl HeadlessPage {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.history[self.cursor]
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_post(&self) -> Option<&str> {
        self.last_post.as_deref()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    fn push(&mut self, url: &str) {
        self.history.truncate(self.cursor + 1);
        self.history.push(url.to_string());
        self.cursor = self.history.len() - 1;
    }
}

/// Toolkit that simulates browser controls in memory.
#[derive(Debug)]
pub struct HeadlessToolkit {
    config: WebViewConfig,
    journal: CallJournal,
    faults: FaultPlan,
    next_handle: u64,
    initialized: bool,
}

impl HeadlessToolkit {
    pub fn new(config: WebViewConfig) -> Self {
        Self {
            config,
            journal: CallJournal::default(),
            faults: FaultPlan::default(),
            next_handle: 1,
            initialized: false,
        }
    }

    /// Record calls into `journal` instead of a private one.
    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    pub fn journal(&self) -> &CallJournal {
        &self.journal
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.config.user_agent.as_deref()
    }

    fn check_url(&self, url: &str) -> Result<(), NativeError> {
        if self.faults.fatal_url.as_deref() == Some(url) {
            return Err(NativeError::Fatal(format!("renderer crashed loading {url}")));
        }
        let scheme = match url.split_once(':') {
            Some((scheme, _)) if !scheme.is_empty() => scheme,
            _ => return Err(NativeError::Operation(format!("invalid URL: {url}"))),
        };
        if self
            .faults
            .rejected_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
        {
            return Err(NativeError::Operation(format!(
                "unsupported scheme '{scheme}' in {url}"
            )));
        }
        Ok(())
    }
}

impl NativeToolkit for HeadlessToolkit {
    type Handle = HeadlessPage;

    fn init(&mut self) -> Result<(), NativeError> {
        self.journal.record(NativeCall::Init);
        if self.faults.fail_init {
            return Err(NativeError::Fatal("native subsystem unavailable".into()));
        }
        self.initialized = true;
        Ok(())
    }

    fn create_window(&mut self, bounds: Rect) -> Result<HeadlessPage, NativeError> {
        if !self.initialized {
            return Err(NativeError::Operation("toolkit not initialized".into()));
        }
        if self.faults.fail_create {
            return Err(NativeError::Operation("window creation refused".into()));
        }
        let id = self.next_handle;
        self.next_handle += 1;
        self.journal.record(NativeCall::CreateWindow { handle: id, bounds });
        debug!(handle = id, home = %self.config.home_url, "headless page created");
        Ok(HeadlessPage {
            id,
            history: vec![self.config.home_url.clone()],
            cursor: 0,
            bounds,
            focused: false,
            loading: false,
            last_post: None,
        })
    }

    fn destroy_window(&mut self, handle: HeadlessPage) -> Result<(), NativeError> {
        self.journal
            .record(NativeCall::DestroyWindow { handle: handle.id });
        Ok(())
    }

    fn set_bounds(&mut self, page: &mut HeadlessPage, bounds: Rect) -> Result<(), NativeError> {
        self.journal.record(NativeCall::SetBounds {
            handle: page.id,
            bounds,
        });
        page.bounds = bounds;
        Ok(())
    }

    fn navigate(
        &mut self,
        page: &mut HeadlessPage,
        request: NavigationRequest<'_>,
    ) -> Result<(), NativeError> {
        self.journal.record(NativeCall::Navigate {
            handle: page.id,
            url: request.url.to_string(),
            post_data: request.post_data.map(str::to_string),
        });
        self.check_url(request.url)?;
        page.push(request.url);
        page.last_post = request.post_data.map(str::to_string);
        page.loading = true;
        Ok(())
    }

    fn go_back(&mut self, page: &mut HeadlessPage) -> Result<(), NativeError> {
        self.journal.record(NativeCall::GoBack { handle: page.id });
        if page.can_go_back() {
            page.cursor -= 1;
            page.loading = true;
        }
        Ok(())
    }

    fn go_forward(&mut self, page: &mut HeadlessPage) -> Result<(), NativeError> {
        self.journal.record(NativeCall::GoForward { handle: page.id });
        if page.can_go_forward() {
            page.cursor += 1;
            page.loading = true;
        }
        Ok(())
    }

    fn refresh(&mut self, page: &mut HeadlessPage) -> Result<(), NativeError> {
        self.journal.record(NativeCall::Refresh { handle: page.id });
        page.loading = true;
        Ok(())
    }

    fn stop(&mut self, page: &mut HeadlessPage) -> Result<(), NativeError> {
        self.journal.record(NativeCall::Stop { handle: page.id });
        page.loading = false;
        Ok(())
    }

    fn current_url(&mut self, page: &HeadlessPage) -> Result<String, NativeError> {
        self.journal.record(NativeCall::CurrentUrl { handle: page.id });
        Ok(page.url().to_string())
    }

    fn set_focus(&mut self, page: &mut HeadlessPage, focused: bool) -> Result<(), NativeError> {
        self.journal.record(NativeCall::SetFocus {
            handle: page.id,
            focused,
        });
        page.focused = focused;
        Ok(())
    }
}

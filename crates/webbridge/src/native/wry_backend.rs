//! `wry` toolkit: each instance is a child `WebView` of one parent window.
//!
//! The parent window belongs to the toolkit, so the factory passed to
//! `Bridge::spawn` must build (or receive) it on the dispatch thread. On
//! platforms where webviews must live on the UI thread, that thread is the
//! dispatch thread.

use tracing::debug;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use webbridge_common::Rect;
use webbridge_config::WebViewConfig;

use super::{NativeError, NativeToolkit, NavigationRequest};

/// Convert bridge bounds (integer logical pixels) to a wry `Rect`.
pub fn to_wry_rect(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(
            f64::from(rect.x),
            f64::from(rect.y),
        )),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            f64::from(rect.width.max(0)),
            f64::from(rect.height.max(0)),
        )),
    }
}

/// Script that submits `body` (URL-encoded) to `url` as a POST form.
fn post_form_script(url: &str, body: &str) -> String {
    // serde_json string encoding doubles as JS string literal escaping.
    let url = serde_json::Value::String(url.to_string());
    let body = serde_json::Value::String(body.to_string());
    format!(
        r#"(function() {{
  var form = document.createElement('form');
  form.method = 'POST';
  form.action = {url};
  new URLSearchParams({body}).forEach(function(value, key) {{
    var input = document.createElement('input');
    input.type = 'hidden';
    input.name = key;
    input.value = value;
    form.appendChild(input);
  }});
  document.documentElement.appendChild(form);
  form.submit();
}})();"#
    )
}

const GO_BACK_SCRIPT: &str = "window.history.back();";
const GO_FORWARD_SCRIPT: &str = "window.history.forward();";
const RELOAD_SCRIPT: &str = "window.location.reload();";
const STOP_SCRIPT: &str = "window.stop();";

fn op(e: wry::Error) -> NativeError {
    NativeError::Operation(e.to_string())
}

/// One child webview plus the last URL we sent it to.
pub struct WryPage {
    webview: WebView,
    current_url: String,
}

impl WryPage {
    pub fn webview(&self) -> &WebView {
        &self.webview
    }
}

/// Toolkit hosting child webviews inside `parent`.
pub struct WryToolkit<W> {
    parent: W,
    config: WebViewConfig,
}

impl<W: HasWindowHandle> WryToolkit<W> {
    pub fn new(parent: W, config: WebViewConfig) -> Self {
        Self { parent, config }
    }

    fn eval(&self, page: &WryPage, script: &str) -> Result<(), NativeError> {
        page.webview.evaluate_script(script).map_err(op)
    }
}

impl<W: HasWindowHandle> NativeToolkit for WryToolkit<W> {
    type Handle = WryPage;

    fn create_window(&mut self, bounds: Rect) -> Result<WryPage, NativeError> {
        let config = &self.config;
        let mut builder = WebViewBuilder::new()
            .with_bounds(to_wry_rect(&bounds))
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(false)
            .with_url(&config.home_url);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let webview = builder.build_as_child(&self.parent).map_err(op)?;
        debug!(url = %config.home_url, "child webview created");

        Ok(WryPage {
            webview,
            current_url: config.home_url.clone(),
        })
    }

    fn destroy_window(&mut self, page: WryPage) -> Result<(), NativeError> {
        // Dropping the webview detaches and releases the native control.
        drop(page);
        Ok(())
    }

    fn set_bounds(&mut self, page: &mut WryPage, bounds: Rect) -> Result<(), NativeError> {
        page.webview.set_bounds(to_wry_rect(&bounds)).map_err(op)
    }

    fn navigate(
        &mut self,
        page: &mut WryPage,
        request: NavigationRequest<'_>,
    ) -> Result<(), NativeError> {
        match request.post_data {
            Some(body) => self.eval(page, &post_form_script(request.url, body))?,
            None => page.webview.load_url(request.url).map_err(op)?,
        }
        page.current_url = request.url.to_string();
        Ok(())
    }

    fn go_back(&mut self, page: &mut WryPage) -> Result<(), NativeError> {
        self.eval(page, GO_BACK_SCRIPT)
    }

    fn go_forward(&mut self, page: &mut WryPage) -> Result<(), NativeError> {
        self.eval(page, GO_FORWARD_SCRIPT)
    }

    fn refresh(&mut self, page: &mut WryPage) -> Result<(), NativeError> {
        self.eval(page, RELOAD_SCRIPT)
    }

    fn stop(&mut self, page: &mut WryPage) -> Result<(), NativeError> {
        self.eval(page, STOP_SCRIPT)
    }

    fn current_url(&mut self, page: &WryPage) -> Result<String, NativeError> {
        // History moves made in script are only visible through the control.
        Ok(page
            .webview
            .url()
            .unwrap_or_else(|_| page.current_url.clone()))
    }

    fn set_focus(&mut self, page: &mut WryPage, focused: bool) -> Result<(), NativeError> {
        if focused {
            page.webview.focus().map_err(op)
        } else {
            page.webview.focus_parent().map_err(op)
        }
    }
}

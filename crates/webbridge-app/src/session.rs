//! One bridge session: create an instance, walk the URLs, shut down.

use serde::Serialize;
use webbridge::native::HeadlessToolkit;
use webbridge::{Bridge, BridgeEvent, BridgeOptions};
use webbridge_common::WebBridgeError;
use webbridge_config::BridgeConfig;

/// What a session produced.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub final_url: String,
    pub events: Vec<BridgeEvent>,
}

/// Navigate a fresh headless instance through `urls`. When `post` is set the
/// last URL is submitted with it as the body.
pub fn run(
    config: &BridgeConfig,
    urls: &[String],
    post: Option<&str>,
) -> Result<SessionReport, WebBridgeError> {
    let webview = config.webview.clone();
    let bridge = Bridge::spawn(BridgeOptions::from_config(config), move || {
        Ok(HeadlessToolkit::new(webview))
    })?;

    let id = bridge.create_instance()?;
    tracing::info!(%id, "instance ready");

    let last = urls.len().saturating_sub(1);
    for (i, url) in urls.iter().enumerate() {
        match post {
            Some(body) if i == last => bridge.navigate_post(id, url, body)?,
            _ => bridge.navigate(id, url)?,
        }
    }

    let final_url = bridge.get_url(id)?;
    bridge.destroy_instance(id)?;
    bridge.shutdown()?;

    Ok(SessionReport {
        final_url,
        events: bridge.drain_events(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_urls_stays_on_home_page() {
        let report = run(&BridgeConfig::default(), &[], None).unwrap();
        assert_eq!(report.final_url, "about:blank");
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, BridgeEvent::Destroyed { .. })));
    }

    #[test]
    fn last_url_wins() {
        let report = run(
            &BridgeConfig::default(),
            &urls(&["https://a.test", "https://b.test"]),
            None,
        )
        .unwrap();
        assert_eq!(report.final_url, "https://b.test");
    }

    #[test]
    fn post_applies_to_last_url() {
        let report = run(
            &BridgeConfig::default(),
            &urls(&["https://a.test", "https://form.test"]),
            Some("q=1"),
        )
        .unwrap();
        assert_eq!(report.final_url, "https://form.test");
        assert!(report.events.iter().any(|e| matches!(
            e,
            BridgeEvent::Dispatched {
                kind: webbridge::EventKind::NavigatePostData,
                ..
            }
        )));
    }

    #[test]
    fn home_url_comes_from_config() {
        let mut config = BridgeConfig::default();
        config.webview.home_url = "https://home.test".into();
        let report = run(&config, &[], None).unwrap();
        assert_eq!(report.final_url, "https://home.test");
    }

    #[test]
    fn blank_url_is_an_argument_error() {
        let err = run(&BridgeConfig::default(), &urls(&[" "]), None).unwrap_err();
        assert!(err.to_string().contains("invalid argument"));
    }
}

//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# webbridge configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[dispatch]
# thread_name = "native-dispatch"

[webview]
# user_agent = "WebBridge/0.1.0"
# transparent = false
# devtools = false
# clipboard = true
# autoplay = false
# home_url = "about:blank"

[webview.bounds]
# x = 0
# y = 0
# width = 800            # 0-16384
# height = 600           # 0-16384

[navigation]
# Empty list allows every URL.
# allowed_prefixes = ["https://", "about:blank"]

[logging]
# level = "webbridge=info"   # any tracing EnvFilter directive
"##
    .to_string()
}

mod cli;
mod session;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use webbridge_config::BridgeConfig;

const DEFAULT_LOG_DIRECTIVE: &str = "webbridge=info";

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid log directive '{directive}', using {DEFAULT_LOG_DIRECTIVE}");
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() {
    let args = cli::parse();

    // Config comes first so its log level can apply.
    let loaded = webbridge_config::load_config(args.config.as_deref());
    let level = args.log_level.clone().or_else(|| {
        loaded
            .as_ref()
            .ok()
            .map(|config| config.logging.level.clone())
    });
    init_logging(level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE));

    tracing::info!("webbridge v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BridgeConfig::default()
    });

    if args.print_config {
        println!("{}", webbridge_config::config_to_json(&config));
        return;
    }

    match session::run(&config, &args.urls, args.post.as_deref()) {
        Ok(report) => {
            println!("{}", serde_json::json!({ "final_url": report.final_url }));
            for event in &report.events {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("Failed to serialize event: {e}"),
                }
            }
            tracing::info!("Shutdown complete");
        }
        Err(e) => {
            tracing::error!("Session failed: {e}");
            std::process::exit(1);
        }
    }
}

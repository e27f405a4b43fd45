use std::path::PathBuf;

use clap::Parser;

/// webbridge: drive an embedded browser instance through the native bridge.
#[derive(Parser, Debug)]
#[command(name = "webbridge", version, about)]
pub struct Args {
    /// URLs to navigate to, in order.
    pub urls: Vec<String>,

    /// URL-encoded body to POST with the last URL.
    #[arg(long)]
    pub post: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_urls_and_flags() {
        let args = Args::parse_from([
            "webbridge",
            "https://a.test",
            "https://b.test",
            "--post",
            "q=1",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.urls, vec!["https://a.test", "https://b.test"]);
        assert_eq!(args.post.as_deref(), Some("q=1"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(!args.print_config);
        assert!(args.config.is_none());
    }

    #[test]
    fn no_urls_is_valid() {
        let args = Args::parse_from(["webbridge", "--print-config"]);
        assert!(args.urls.is_empty());
        assert!(args.print_config);
    }
}

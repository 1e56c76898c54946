//! Command-line arguments and the resolved, read-only client configuration.
//!
//! Arguments fall back to environment variables where a credential is
//! involved, so keys never need to appear in shell history.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::page;
use crate::source::upstream::UPSTREAM_ENDPOINT;

/// Path of the managed serverless proxy, relative to the page origin.
pub const MANAGED_PROXY_PATH: &str = "/.netlify/functions/apod";

/// Path of the operator-supplied local proxy, relative to the page origin.
pub const LOCAL_PROXY_PATH: &str = "/api/apod";

pub const DEFAULT_ORIGIN: &str = "http://localhost:8888";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8888";

/// Per-request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(
    name = "apod-lens",
    about = "NASA Astronomy Picture of the Day, fetched through a fallback chain",
    version
)]
pub struct Cli {
    /// Log filter (trace, debug, info, warn, error) when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show today's picture in the terminal.
    Show(ClientArgs),

    /// Print today's picture as an HTML fragment.
    Render {
        #[command(flatten)]
        client: ClientArgs,

        /// Write the fragment to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the APOD proxy endpoints.
    Proxy(ProxyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Origin hosting the proxy endpoints.
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: Url,

    /// Upstream APOD endpoint for key-based requests.
    #[arg(long, default_value = UPSTREAM_ENDPOINT)]
    pub upstream: Url,

    /// Client-side API key (development only; it is sent from this machine).
    ///
    /// Only `CLIENT_NASA_API_KEY` is read.  `NASA_API_KEY` belongs to the
    /// proxy and must not leave the server.
    #[arg(long, env = "CLIENT_NASA_API_KEY", hide_env_values = true)]
    pub client_key: Option<String>,

    /// HTML page whose `nasa-api-key` meta tag supplies a fallback key.
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Per-request timeout in seconds (at least 1).
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ProxyArgs {
    /// Address to listen on (host:port).
    #[arg(long, default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Server-held API key.
    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = UPSTREAM_ENDPOINT)]
    pub upstream: Url,

    /// Per-request timeout in seconds (at least 1).
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

/// Everything the acquisition chain reads, resolved once before it runs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub managed_proxy: Url,
    pub local_proxy: Url,
    pub upstream: Url,
    pub client_key: Option<String>,
    pub meta_key: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Resolve endpoints and read the page's meta tag.
    pub fn resolve(args: &ClientArgs) -> Result<Self> {
        let managed_proxy = args
            .origin
            .join(MANAGED_PROXY_PATH)
            .with_context(|| format!("invalid origin {}", args.origin))?;
        let local_proxy = args
            .origin
            .join(LOCAL_PROXY_PATH)
            .with_context(|| format!("invalid origin {}", args.origin))?;
        let meta_key = args.page.as_deref().and_then(page::meta_api_key_from_file);

        Ok(Self {
            managed_proxy,
            local_proxy,
            upstream: args.upstream.clone(),
            client_key: non_empty(args.client_key.as_deref()),
            meta_key,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

/// Treat empty and whitespace-only values as unset.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn show_uses_defaults() {
        let cli = parse(&["apod-lens", "show"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        let config = ClientConfig::resolve(&args).unwrap();

        assert_eq!(
            config.managed_proxy.as_str(),
            "http://localhost:8888/.netlify/functions/apod"
        );
        assert_eq!(config.local_proxy.as_str(), "http://localhost:8888/api/apod");
        assert_eq!(config.upstream.as_str(), UPSTREAM_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.meta_key.is_none());
    }

    #[test]
    fn proxy_paths_ignore_origin_path() {
        let cli = parse(&["apod-lens", "render", "--origin", "https://example.org/site/"]);
        let Command::Render { client, output } = cli.command else {
            panic!("expected render");
        };
        assert!(output.is_none());
        let config = ClientConfig::resolve(&client).unwrap();
        assert_eq!(config.local_proxy.as_str(), "https://example.org/api/apod");
    }

    #[test]
    fn blank_client_key_is_unset() {
        let cli = parse(&["apod-lens", "show", "--client-key", "  "]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert!(ClientConfig::resolve(&args).unwrap().client_key.is_none());
    }

    #[test]
    fn rejects_invalid_origin() {
        assert!(Cli::try_parse_from(["apod-lens", "show", "--origin", "not a url"]).is_err());
    }

    #[test]
    fn proxy_parses_listen_address() {
        let cli = parse(&["apod-lens", "proxy", "--listen", "0.0.0.0:9000"]);
        let Command::Proxy(args) = cli.command else {
            panic!("expected proxy");
        };
        assert_eq!(args.listen, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn client_key_reads_only_client_env_var() {
        let cmd = Cli::command();
        for name in ["show", "render"] {
            let sub = cmd.find_subcommand(name).unwrap();
            let arg = sub.get_arguments().find(|a| a.get_id() == "client_key").unwrap();
            assert_eq!(arg.get_env(), Some(OsStr::new("CLIENT_NASA_API_KEY")));
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["apod-lens", "show", "--timeout-secs", "0"]).is_err());
        assert!(Cli::try_parse_from(["apod-lens", "proxy", "--timeout-secs", "0"]).is_err());

        let cli = parse(&["apod-lens", "proxy", "--timeout-secs", "1"]);
        let Command::Proxy(args) = cli.command else {
            panic!("expected proxy");
        };
        assert_eq!(args.timeout_secs, 1);
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty(Some(" k ")).as_deref(), Some("k"));
        assert!(non_empty(Some("")).is_none());
        assert!(non_empty(None).is_none());
    }
}

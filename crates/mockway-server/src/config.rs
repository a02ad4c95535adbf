//! Process configuration from command-line flags and environment.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mockway_core::types::upstream::UpstreamTarget;

use crate::proxy::ProxyConfig;

/// Serve mocked fixtures for selected routes and proxy everything else.
#[derive(Debug, Clone, Parser)]
#[command(name = "mockway", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "MOCKWAY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "MOCKWAY_PORT", default_value_t = 5050)]
    pub port: u16,

    /// Base URL of the real backend, e.g. https://api.example.com
    #[arg(long, env = "MOCKWAY_UPSTREAM")]
    pub upstream: UpstreamTarget,

    /// Path or glob pattern of the mock rule file(s)
    #[arg(long, env = "MOCKWAY_MOCKS", default_value = "mocks.yaml")]
    pub mocks: String,

    /// Directory fixture names are resolved against
    #[arg(long, env = "MOCKWAY_FIXTURES", default_value = "data")]
    pub fixtures: PathBuf,

    /// Upper bound in seconds for one upstream call
    #[arg(long, env = "MOCKWAY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Upper bound in seconds for connecting to the upstream
    #[arg(long, env = "MOCKWAY_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Largest request body forwarded upstream, in bytes
    #[arg(long, env = "MOCKWAY_MAX_BODY_BYTES", default_value_t = 16 * 1024 * 1024)]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn proxy(&self) -> ProxyConfig {
        ProxyConfig {
            upstream: self.upstream.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_defaults() {
        let config =
            ServerConfig::try_parse_from(["mockway", "--upstream", "https://api.example.com"])
                .expect("Should parse");

        assert_eq!(config.addr(), "127.0.0.1:5050".parse().unwrap());
        assert_eq!(config.mocks, "mocks.yaml");
        assert_eq!(config.fixtures, PathBuf::from("data"));

        let proxy = config.proxy();
        assert_eq!(proxy.upstream.to_string(), "https://api.example.com");
        assert_eq!(proxy.timeout, Duration::from_secs(30));
        assert_eq!(proxy.connect_timeout, Duration::from_secs(10));
        assert_eq!(proxy.max_body_bytes, 16 * 1024 * 1024);
    }

    #[rstest]
    fn test_overrides() {
        let config = ServerConfig::try_parse_from([
            "mockway",
            "--upstream",
            "http://127.0.0.1:9000",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--mocks",
            "mocks/*.yaml",
            "--fixtures",
            "fixtures",
            "--timeout-secs",
            "5",
        ])
        .expect("Should parse");

        assert_eq!(config.addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.mocks, "mocks/*.yaml");
        assert_eq!(config.proxy().timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case("ftp://files.example.com")]
    #[case("not-a-url")]
    fn test_rejects_invalid_upstream(#[case] upstream: &str) {
        let result = ServerConfig::try_parse_from(["mockway", "--upstream", upstream]);
        assert!(result.is_err());
    }
}

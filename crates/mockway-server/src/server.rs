//! Process startup: load rules, build the pipeline, serve until Ctrl-C.

use mockway_core::config::loader::load_rules;
use mockway_core::fixtures::DirectoryStore;
use mockway_core::mocks::{MockRouter, MockTable};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::Error;
use crate::pipeline::{self, AppState};
use crate::proxy::ProxyForwarder;

/// Load the mock table and build the shared pipeline state.
pub fn build_state(config: &ServerConfig) -> Result<AppState, Error> {
    let table = MockTable::new(load_rules(&config.mocks)?);
    if table.is_empty() {
        tracing::warn!(
            mocks = %config.mocks,
            "rule files declare no mock rules; every request is proxied"
        );
    }
    tracing::info!(
        rules = table.len(),
        enabled = table.enabled_count(),
        mocks = %config.mocks,
        "loaded mock rules"
    );
    for rule in table.rules().iter().filter(|rule| rule.enabled) {
        tracing::debug!(
            method = %rule.method,
            path = %rule.path,
            fixture = %rule.fixture,
            status = rule.status,
            "mock rule"
        );
    }
    for rule in table.shadowed() {
        tracing::warn!(
            method = %rule.method,
            path = %rule.path,
            fixture = %rule.fixture,
            "mock rule is shadowed by an earlier rule for the same method and path"
        );
    }

    let store = DirectoryStore::new(&config.fixtures);
    if !store.root().is_dir() {
        tracing::warn!(fixtures = %store.root().display(), "fixture directory does not exist");
    }

    let proxy = ProxyForwarder::new(config.proxy())?;
    Ok(AppState::new(MockRouter::new(table, store), proxy))
}

/// Bind the listener and serve until shutdown.
pub async fn run(config: ServerConfig) -> Result<(), Error> {
    let state = build_state(&config)?;
    let listener = TcpListener::bind(config.addr()).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream,
        "mockway is listening"
    );

    axum::serve(listener, pipeline::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("mockway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    fn config(mocks: &str, fixtures: &std::path::Path) -> ServerConfig {
        ServerConfig::try_parse_from([
            "mockway",
            "--upstream",
            "https://api.example.com",
            "--mocks",
            mocks,
            "--fixtures",
            fixtures.to_str().unwrap(),
        ])
        .unwrap()
    }

    #[rstest]
    fn test_build_state_loads_rules() {
        let dir = tempfile::tempdir().unwrap();
        let mocks = dir.path().join("mocks.yaml");
        std::fs::write(
            &mocks,
            "- path: /api/v1/config\n  fixture: config.json\n\
             - path: /api/v1/config\n  fixture: config-copy.json\n",
        )
        .unwrap();

        let state = build_state(&config(mocks.to_str().unwrap(), dir.path())).unwrap();
        assert_eq!(state.mocks.table().len(), 2);
        assert_eq!(state.mocks.table().shadowed().len(), 1);
        assert_eq!(state.proxy.upstream().to_string(), "https://api.example.com");
    }

    #[rstest]
    fn test_build_state_accepts_empty_rule_file() {
        let dir = tempfile::tempdir().unwrap();
        let mocks = dir.path().join("mocks.yaml");
        std::fs::write(&mocks, "[]\n").unwrap();

        let state = build_state(&config(mocks.to_str().unwrap(), dir.path())).unwrap();
        assert!(state.mocks.table().is_empty());
    }

    #[rstest]
    fn test_build_state_fails_on_missing_rules() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.yaml", dir.path().display());
        let err = build_state(&config(&pattern, dir.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

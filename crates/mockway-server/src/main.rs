use clap::Parser;
use mockway_server::{server, Error, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::parse();
    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "mockway failed");
        return Err(e);
    }
    Ok(())
}

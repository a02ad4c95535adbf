//! Development proxy that answers selected routes from JSON fixtures and
//! forwards everything else to a single upstream origin.

pub mod config;
pub mod cors;
pub mod error;
pub mod mock;
pub mod observe;
pub mod pipeline;
pub mod proxy;
pub mod server;

pub use config::ServerConfig;
pub use error::Error;

//! Core library for the mockway development proxy.
//!
//! Holds the mock rule model, rule file loading, fixture lookup and the
//! routing decision that picks between a fixture and the upstream.

pub mod config;
pub mod fixtures;
pub mod mocks;
pub mod types;

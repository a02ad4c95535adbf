//! Core domain types for mock rules and the upstream target.

pub mod method;
pub mod rule;
pub mod upstream;

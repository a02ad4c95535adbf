//! Rule file parsing and loading.

pub mod error;
pub mod loader;
pub mod parser;
pub mod rule;

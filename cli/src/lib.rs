//! parquet-viewer CLI library, exposed for unit tests.

pub mod app;
pub mod commands;
pub mod settings;

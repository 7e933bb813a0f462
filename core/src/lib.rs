pub mod api;
pub mod backend;
pub mod cancel;
pub mod config;
pub mod error;
pub mod json;
pub mod logging;
pub mod provider;
pub mod runner;
pub mod util;

//! Loanee Cache - caching proxy for football loanee data
//!
//! Forwards requests to a sports data API with the secret token injected,
//! caching responses under per-category TTL policies that adapt to the
//! transfer-window calendar and match lifecycle.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_sweeper, SweeperHandle};

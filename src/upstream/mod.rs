//! Upstream Module
//!
//! Forwarding to the sports data API and the rules that decide how a
//! proxied path is cached.

mod client;
pub mod route;

pub use client::{UpstreamClient, API_TOKEN_PARAM};

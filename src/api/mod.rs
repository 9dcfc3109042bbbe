//! API Module
//!
//! HTTP handlers and routing for the caching proxy and its admin API.
//!
//! # Endpoints
//! - `GET /api/*path` - Proxy to the sports data API, cached per category
//! - `GET /cache/stats` - Cache size, keys and counters
//! - `GET /cache/policy` - Current TTL per category
//! - `POST /cache/policy/loan-window` - Apply the transfer-window rule
//! - `POST /cache/policy/match-status` - Apply the match-lifecycle rule
//! - `DELETE /cache/categories/:category` - Drop all entries of a category
//! - `DELETE /cache/keys/:category/*discriminator` - Drop one entry
//! - `DELETE /cache` - Drop everything
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

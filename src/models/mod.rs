//! Request and Response models for the proxy server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{LoanWindowRequest, MatchStatusRequest};
pub use responses::{
    ClearResponse, DeleteResponse, HealthResponse, PolicyUpdateResponse, RefreshResponse,
};

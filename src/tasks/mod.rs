//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries nobody reads again

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};

//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at a configured interval

mod sweeper;

pub use sweeper::spawn_eviction_task;

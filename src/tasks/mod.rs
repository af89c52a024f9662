//! Background Tasks Module
//!
//! Optional background work for a shared cache.
//!
//! # Tasks
//! - Expiry sweep: purges expired entries at a configured interval

mod sweeper;

pub use sweeper::spawn_sweeper_task;

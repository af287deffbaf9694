//! # Middleware
//!
//! - `metrics`: request and error counters.

pub mod metrics;

//! # API Route Modules
//!
//! - `passes`: create, validate, list, fetch, delete and download passes.
//! - `qrcode`: QR image rendering for previews.
//! - `templates`: the template catalogue.
//! - `health`: health, API index, metrics scrape and the 404 fallback.

pub mod health;
pub mod passes;
pub mod qrcode;
pub mod templates;

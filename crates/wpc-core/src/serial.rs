//! # Serial Number Generator
//!
//! `PASS-<epoch millis>-<random base-36 suffix>`, upper-cased. Uniqueness is
//! probabilistic: the millisecond timestamp dominates and the suffix separates
//! passes created in the same millisecond. No lookup against stored passes is
//! performed here; callers that own a store handle collisions.

use chrono::Utc;
use rand::Rng;

/// Literal prefix of every generated serial number.
pub const SERIAL_PREFIX: &str = "PASS";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 13;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new serial number using the current time and thread RNG.
pub fn generate() -> String {
    generate_with(Utc::now().timestamp_millis(), &mut rand::thread_rng())
}

/// Generate a serial number from an explicit timestamp and RNG.
pub fn generate_with<R: Rng + ?Sized>(timestamp_millis: i64, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{SERIAL_PREFIX}-{timestamp_millis}-{suffix}").to_uppercase()
}

//! API handlers and shared utilities for Quill.
//!
//! This module organizes the service's route handlers and provides common
//! helpers for input validation and token timestamps.

pub mod auth;
pub mod health;
pub mod posts;
pub mod root;

use regex::Regex;
use std::time::SystemTime;

/// Lightweight username sanity check used before persisting accounts.
/// Usernames are case-sensitive and 1..=64 chars of `[A-Za-z0-9._-]`.
pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9._-]{1,64}$").is_ok_and(|re| re.is_match(username))
}

/// Unix seconds for token issue/expiry timestamps.
pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

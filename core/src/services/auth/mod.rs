//! Login security module
//!
//! This module guards sign-in against brute force:
//! - Per-IP and per-user failed attempt counting
//! - IP and account blocking with lazy unblocking of IPs
//! - Phone confirmation checks
//! - Blocked-account notifications

mod blocker;
mod config;

#[cfg(test)]
mod tests;

pub use blocker::{Blocker, IP_FAIL_WINDOW_MINUTES, USER_FAIL_WINDOW_MINUTES};
pub use config::BlockerConfig;

//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - MySQL store implementations of the core repository traits
//! - Embedded schema migrations

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlBlockedIpRepository, MySqlFailAttemptRepository, MySqlTokenRepository,
    MySqlUserRepository,
};

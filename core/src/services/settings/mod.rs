//! Settings provider abstraction for the login security and autologout policy

mod provider;

#[cfg(test)]
pub mod mock;

pub use provider::SettingsProvider;

#[cfg(test)]
pub use mock::MockSettingsProvider;

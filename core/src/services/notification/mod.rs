//! Notification dispatcher abstraction

mod dispatcher;

#[cfg(test)]
pub mod mock;

pub use dispatcher::NotificationDispatcher;

#[cfg(test)]
pub use mock::MockNotificationDispatcher;

//! Notification storage and dispatch.
//!
//! Everything is synchronous and in-process: a notification is "delivered"
//! the moment it is appended to the store.

mod dispatch;
mod store;

pub use dispatch::{Recipient, dispatch, expand_recipients};
pub use store::NotificationStore;

//! Failcast Library
//!
//! Fans a build-failure event out to every notification channel a
//! subscriber has configured: email, Discord, Gotify, Telegram and Slack.
//! Transports, template rendering and subscription lookup are supplied by
//! the embedding application through the traits in [`services`].

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;

pub use error::{AppError, AppResult};
pub use services::{NotificationDispatcher, NotificationService};

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

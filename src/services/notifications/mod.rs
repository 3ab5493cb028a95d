//! Build failure notifications with pluggable channel senders.
//!
//! The [`NotificationDispatcher`] formats an event for every configured
//! channel of every subscription and hands each message to the matching
//! [`ChannelSender`]. Failures are captured per channel and never abort
//! the remaining sends.

mod dispatcher;
mod provider;
mod resolver;

pub mod formatters;
pub mod notification_service;

#[cfg(test)]
mod testing;

pub use dispatcher::NotificationDispatcher;
pub use formatters::MessageTexts;
pub use notification_service::NotificationService;
pub use provider::{
    ChannelSender, ChannelSenders, DiscordSender, EmailSender, GotifySender, SlackSender,
    TelegramSender, TemplateRenderer,
};
pub use resolver::{StaticResolver, SubscriptionResolver};

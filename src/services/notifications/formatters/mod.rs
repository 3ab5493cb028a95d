//! Pure, per-channel message formatters.
//!
//! Every formatter reads time exclusively from the [`DispatchContext`], so
//! formatting the same event and config twice yields identical messages.

pub mod decoration;
pub mod discord;
pub mod email;
pub mod gotify;
pub mod slack;
pub mod telegram;

pub use decoration::{Decorator, Label, decorate};

use crate::models::{ChannelConfig, DispatchContext, EmailMessage, FormattedMessage};

/// Static texts that are configurable but constant across a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTexts {
    pub email_subject: String,
    pub footer_text: String,
}

impl Default for MessageTexts {
    fn default() -> Self {
        Self {
            email_subject: "Build failed for dokploy".to_string(),
            footer_text: "Dokploy Build Notification".to_string(),
        }
    }
}

/// Formats `channel` into its native message.
///
/// Emails come back with an empty `html`; rendering the template is an
/// asynchronous step owned by the dispatcher.
pub fn render(
    ctx: &DispatchContext,
    channel: ChannelConfig<'_>,
    texts: &MessageTexts,
) -> FormattedMessage {
    match channel {
        ChannelConfig::Email(_) => FormattedMessage::Email(EmailMessage {
            subject: texts.email_subject.clone(),
            template: email::format(ctx),
            html: String::new(),
        }),
        ChannelConfig::Discord(config) => {
            FormattedMessage::Discord(discord::format(ctx, config, &texts.footer_text))
        }
        ChannelConfig::Gotify(config) => FormattedMessage::Gotify(gotify::format(ctx, config)),
        ChannelConfig::Telegram(config) => {
            FormattedMessage::Telegram(telegram::format(ctx, config))
        }
        ChannelConfig::Slack(config) => FormattedMessage::Slack(slack::format(ctx, config)),
    }
}

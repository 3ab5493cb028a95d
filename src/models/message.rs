//! Channel-native message shapes handed to senders.
//!
//! Field names follow each provider's wire format so a sender can post
//! the serialized value as-is.

use serde::{Deserialize, Serialize};

use super::subscription::ChannelKind;
use crate::error::FormatterError;

/// A message with a known channel that serializes to its provider's JSON body.
///
/// Senders call [`WireMessage::to_payload`] and propagate with `?`; the
/// failure converts into [`DeliveryError::Format`](crate::error::DeliveryError::Format).
pub trait WireMessage: Serialize {
    const CHANNEL: ChannelKind;

    fn to_payload(&self) -> Result<serde_json::Value, FormatterError> {
        serde_json::to_value(self).map_err(|e| FormatterError {
            channel: Self::CHANNEL.to_string(),
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// Discord
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<DiscordField>,
    pub timestamp: String,
    pub footer: DiscordFooter,
}

/// Webhook body with a single embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordMessage {
    pub embeds: Vec<DiscordEmbed>,
}

// ============================================================================
// Gotify
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GotifyMessage {
    pub title: String,
    pub message: String,
    pub priority: u8,
}

// ============================================================================
// Telegram
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramMessage {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: String,
    pub disable_web_page_preview: bool,
}

// ============================================================================
// Slack
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub color: String,
    pub pretext: String,
    pub fields: Vec<SlackField>,
    pub actions: Vec<SlackAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub attachments: Vec<SlackAttachment>,
}

// ============================================================================
// Email
// ============================================================================

/// Values fed to the build-failed email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFailedEmail {
    pub project_name: String,
    pub application_name: String,
    pub application_type: String,
    pub error_message: String,
    pub build_link: String,
    pub date: String,
}

/// An email ready for the sender. `html` is empty when rendering degraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub template: BuildFailedEmail,
    pub html: String,
}

/// Any rendered message, tagged by channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "channel", content = "message", rename_all = "lowercase")]
pub enum FormattedMessage {
    Email(EmailMessage),
    Discord(DiscordMessage),
    Gotify(GotifyMessage),
    Telegram(TelegramMessage),
    Slack(SlackMessage),
}

impl WireMessage for EmailMessage {
    const CHANNEL: ChannelKind = ChannelKind::Email;
}

impl WireMessage for DiscordMessage {
    const CHANNEL: ChannelKind = ChannelKind::Discord;
}

impl WireMessage for GotifyMessage {
    const CHANNEL: ChannelKind = ChannelKind::Gotify;
}

impl WireMessage for TelegramMessage {
    const CHANNEL: ChannelKind = ChannelKind::Telegram;
}

impl WireMessage for SlackMessage {
    const CHANNEL: ChannelKind = ChannelKind::Slack;
}

impl FormattedMessage {
    /// The provider body of the wrapped message, without the channel tag.
    pub fn to_payload(&self) -> Result<serde_json::Value, FormatterError> {
        match self {
            FormattedMessage::Email(m) => m.to_payload(),
            FormattedMessage::Discord(m) => m.to_payload(),
            FormattedMessage::Gotify(m) => m.to_payload(),
            FormattedMessage::Telegram(m) => m.to_payload(),
            FormattedMessage::Slack(m) => m.to_payload(),
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            FormattedMessage::Email(_) => ChannelKind::Email,
            FormattedMessage::Discord(_) => ChannelKind::Discord,
            FormattedMessage::Gotify(_) => ChannelKind::Gotify,
            FormattedMessage::Telegram(_) => ChannelKind::Telegram,
            FormattedMessage::Slack(_) => ChannelKind::Slack,
        }
    }
}

//! Subscription records and per-channel configuration.
//!
//! Records are produced by a [`SubscriptionResolver`](crate::services::SubscriptionResolver)
//! and only read by the dispatcher. Each channel block is optional; a record
//! with no blocks is skipped.

use serde::{Deserialize, Serialize};

fn default_gotify_priority() -> u8 {
    5
}

fn default_smtp_port() -> u16 {
    587
}

/// The closed set of delivery channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Discord,
    Gotify,
    Telegram,
    Slack,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 5] = [
        ChannelKind::Email,
        ChannelKind::Discord,
        ChannelKind::Gotify,
        ChannelKind::Telegram,
        ChannelKind::Slack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Discord => "discord",
            ChannelKind::Gotify => "gotify",
            ChannelKind::Telegram => "telegram",
            ChannelKind::Slack => "slack",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SMTP delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    #[serde(default)]
    pub to_addresses: Vec<String>,
    #[serde(default)]
    pub decoration: bool,
}

/// Discord-style webhook carrying an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    pub webhook_url: String,
    #[serde(default)]
    pub decoration: bool,
}

/// Gotify-style push server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GotifyConfig {
    pub server_url: String,
    pub app_token: String,
    #[serde(default = "default_gotify_priority")]
    pub priority: u8,
    #[serde(default)]
    pub decoration: bool,
}

/// Telegram-style bot chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    #[serde(default)]
    pub decoration: bool,
}

/// Slack-style incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    pub webhook_url: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub decoration: bool,
}

/// Borrowed view of one configured channel of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelConfig<'a> {
    Email(&'a EmailConfig),
    Discord(&'a DiscordConfig),
    Gotify(&'a GotifyConfig),
    Telegram(&'a TelegramConfig),
    Slack(&'a SlackConfig),
}

impl ChannelConfig<'_> {
    pub fn kind(&self) -> ChannelKind {
        match self {
            ChannelConfig::Email(_) => ChannelKind::Email,
            ChannelConfig::Discord(_) => ChannelKind::Discord,
            ChannelConfig::Gotify(_) => ChannelKind::Gotify,
            ChannelConfig::Telegram(_) => ChannelKind::Telegram,
            ChannelConfig::Slack(_) => ChannelKind::Slack,
        }
    }

    /// Whether the channel's formatter prefixes labels with glyphs.
    pub fn decoration_enabled(&self) -> bool {
        match self {
            ChannelConfig::Email(c) => c.decoration,
            ChannelConfig::Discord(c) => c.decoration,
            ChannelConfig::Gotify(c) => c.decoration,
            ChannelConfig::Telegram(c) => c.decoration,
            ChannelConfig::Slack(c) => c.decoration,
        }
    }
}

/// One account's notification preferences for an event category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub discord: Option<DiscordConfig>,
    #[serde(default)]
    pub gotify: Option<GotifyConfig>,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub slack: Option<SlackConfig>,
}

impl SubscriptionRecord {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            ..Default::default()
        }
    }

    /// Iterates the configured channels in [`ChannelKind::ALL`] order.
    pub fn channels(&self) -> impl Iterator<Item = ChannelConfig<'_>> {
        [
            self.email.as_ref().map(ChannelConfig::Email),
            self.discord.as_ref().map(ChannelConfig::Discord),
            self.gotify.as_ref().map(ChannelConfig::Gotify),
            self.telegram.as_ref().map(ChannelConfig::Telegram),
            self.slack.as_ref().map(ChannelConfig::Slack),
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.channels().next().is_none()
    }
}

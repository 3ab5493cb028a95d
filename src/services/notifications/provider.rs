//! Injected capabilities: channel senders and the email template renderer.
//!
//! The dispatcher knows nothing about transports. Each channel kind gets one
//! sender; HTTP clients, bot APIs, retries and timeouts live behind it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DeliveryError, RenderError};
use crate::models::{
    BuildFailedEmail, DiscordConfig, DiscordMessage, EmailConfig, EmailMessage, GotifyConfig,
    GotifyMessage, SlackConfig, SlackMessage, TelegramConfig, TelegramMessage,
};

/// Delivers a formatted message of type `M` using channel configuration `C`.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Implementations must be Send + Sync; the dispatcher calls them concurrently.
///
/// # Example Implementation
/// ```ignore
/// struct DiscordWebhook { client: reqwest::Client }
///
/// #[async_trait]
/// impl ChannelSender<DiscordConfig, DiscordMessage> for DiscordWebhook {
///     async fn send(&self, config: &DiscordConfig, message: &DiscordMessage) -> Result<(), DeliveryError> {
///         // POST `message` as JSON to `config.webhook_url`
///     }
///
///     fn name(&self) -> &'static str {
///         "discord-webhook"
///     }
/// }
/// ```
#[async_trait]
pub trait ChannelSender<C, M>: Send + Sync
where
    C: Sync,
    M: Sync,
{
    async fn send(&self, config: &C, message: &M) -> Result<(), DeliveryError>;

    /// Sender name for logging
    fn name(&self) -> &'static str;
}

/// Renders the build-failed email template to HTML.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, input: &BuildFailedEmail) -> Result<String, RenderError>;
}

pub type EmailSender = Arc<dyn ChannelSender<EmailConfig, EmailMessage>>;
pub type DiscordSender = Arc<dyn ChannelSender<DiscordConfig, DiscordMessage>>;
pub type GotifySender = Arc<dyn ChannelSender<GotifyConfig, GotifyMessage>>;
pub type TelegramSender = Arc<dyn ChannelSender<TelegramConfig, TelegramMessage>>;
pub type SlackSender = Arc<dyn ChannelSender<SlackConfig, SlackMessage>>;

/// One sender per channel kind.
#[derive(Clone)]
pub struct ChannelSenders {
    pub email: EmailSender,
    pub discord: DiscordSender,
    pub gotify: GotifySender,
    pub telegram: TelegramSender,
    pub slack: SlackSender,
}

impl std::fmt::Debug for ChannelSenders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSenders")
            .field("email", &self.email.name())
            .field("discord", &self.discord.name())
            .field("gotify", &self.gotify.name())
            .field("telegram", &self.telegram.name())
            .field("slack", &self.slack.name())
            .finish()
    }
}

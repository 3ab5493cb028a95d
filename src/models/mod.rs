//! Domain models for build failure notifications.

mod event;
mod message;
mod outcome;
mod subscription;

pub use event::{DispatchContext, EventCategory, EventPayload};
pub use message::{
    BuildFailedEmail, DiscordEmbed, DiscordField, DiscordFooter, DiscordMessage, EmailMessage,
    FormattedMessage, GotifyMessage, SlackAction, SlackAttachment, SlackField, SlackMessage,
    TelegramMessage, WireMessage,
};
pub use outcome::{DispatchOutcome, DispatchReport, DispatchStatus};
pub use subscription::{
    ChannelConfig, ChannelKind, DiscordConfig, EmailConfig, GotifyConfig, SlackConfig,
    SubscriptionRecord, TelegramConfig,
};

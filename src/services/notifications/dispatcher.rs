//! Fan-out of one event to every configured channel of every subscription.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::{FutureExt, StreamExt, stream};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::formatters::{self, MessageTexts};
use super::provider::{ChannelSenders, TemplateRenderer};
use crate::config::DispatchConfig;
use crate::error::{AppError, AppResult, DeliveryError, FormatterError, RenderDegradation};
use crate::models::{
    ChannelConfig, ChannelKind, DispatchContext, DispatchOutcome, DispatchReport, DispatchStatus,
    EmailConfig, EmailMessage, EventPayload, FormattedMessage, SubscriptionRecord,
};

type SendResult = (Result<(), DeliveryError>, Option<RenderDegradation>);

/// Formats and sends an event across subscriptions, isolating every send.
///
/// `dispatch` never fails because of a channel: each (subscription, channel)
/// pair yields exactly one [`DispatchOutcome`]. Only an invalid event is an error.
pub struct NotificationDispatcher {
    senders: ChannelSenders,
    renderer: Arc<dyn TemplateRenderer>,
    texts: MessageTexts,
    time_zone: TimeZone,
    date_format: String,
    max_concurrent_sends: usize,
}

impl NotificationDispatcher {
    /// Creates a dispatcher from validated dispatch settings.
    pub fn new(
        senders: ChannelSenders,
        renderer: Arc<dyn TemplateRenderer>,
        config: &DispatchConfig,
    ) -> AppResult<Self> {
        config.validate().map_err(|e| AppError::Configuration {
            key: "dispatch".to_string(),
            source: e.into(),
        })?;
        let time_zone = config.time_zone().map_err(|e| AppError::Configuration {
            key: "dispatch.timezone".to_string(),
            source: e.into(),
        })?;

        Ok(Self {
            senders,
            renderer,
            texts: MessageTexts {
                email_subject: config.email_subject.clone(),
                footer_text: config.footer_text.clone(),
            },
            time_zone,
            date_format: config.date_format.clone(),
            max_concurrent_sends: config.max_concurrent_sends,
        })
    }

    /// Dispatches `event` now.
    pub async fn dispatch(
        &self,
        event: EventPayload,
        subscriptions: &[SubscriptionRecord],
    ) -> AppResult<DispatchReport> {
        let now = Timestamp::now().to_zoned(self.time_zone.clone());
        self.dispatch_at(event, subscriptions, now).await
    }

    /// Dispatches `event` as if it occurred at `occurred_at`.
    #[instrument(
        name = "dispatch",
        skip_all,
        fields(
            project = %event.project_name,
            application = %event.application_name,
            subscriptions = subscriptions.len(),
        )
    )]
    pub async fn dispatch_at(
        &self,
        event: EventPayload,
        subscriptions: &[SubscriptionRecord],
        occurred_at: Zoned,
    ) -> AppResult<DispatchReport> {
        event.validate()?;
        let ctx = DispatchContext::new(event, occurred_at, &self.date_format);

        let sends = subscriptions
            .iter()
            .enumerate()
            .flat_map(|(position, record)| {
                record
                    .channels()
                    .map(move |channel| (position, record.id.as_str(), channel))
            });

        let mut outcomes: Vec<(usize, DispatchOutcome)> = stream::iter(sends)
            .map(|(position, subscription_id, channel)| {
                let ctx = &ctx;
                async move { (position, self.deliver(ctx, subscription_id, channel).await) }
            })
            .buffer_unordered(self.max_concurrent_sends)
            .collect()
            .await;

        outcomes.sort_by_key(|(position, outcome)| (*position, outcome.channel));
        let report = DispatchReport::new(outcomes.into_iter().map(|(_, o)| o).collect());

        info!(
            sends = report.len(),
            delivered = report.delivered().count(),
            failed = report.failed().count(),
            degraded = report.degraded().count(),
            "Build failure dispatch finished"
        );

        Ok(report)
    }

    /// Renders every configured channel of `record` without sending anything.
    pub fn preview(
        &self,
        ctx: &DispatchContext,
        record: &SubscriptionRecord,
    ) -> Vec<FormattedMessage> {
        record
            .channels()
            .map(|channel| formatters::render(ctx, channel, &self.texts))
            .collect()
    }

    /// Builds the context `dispatch` would use at `occurred_at`.
    pub fn context(&self, event: EventPayload, occurred_at: Timestamp) -> DispatchContext {
        DispatchContext::new(
            event,
            occurred_at.to_zoned(self.time_zone.clone()),
            &self.date_format,
        )
    }

    async fn deliver(
        &self,
        ctx: &DispatchContext,
        subscription_id: &str,
        channel: ChannelConfig<'_>,
    ) -> DispatchOutcome {
        let start = Instant::now();
        let kind = channel.kind();

        let (result, degradation) = match AssertUnwindSafe(self.send(ctx, channel))
            .catch_unwind()
            .await
        {
            Ok(sent) => sent,
            Err(panic) => (
                Err(DeliveryError::Panicked {
                    message: panic_message(&*panic),
                }),
                None,
            ),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let status = match result {
            Ok(()) => {
                debug!(subscription_id, channel = %kind, duration_ms, "Notification delivered");
                DispatchStatus::Delivered
            }
            Err(error) => {
                warn!(
                    subscription_id,
                    channel = %kind,
                    duration_ms,
                    error = %error,
                    "Notification delivery failed"
                );
                DispatchStatus::Failed(error)
            }
        };

        DispatchOutcome {
            subscription_id: subscription_id.to_string(),
            channel: kind,
            status,
            degradation,
            duration_ms,
        }
    }

    async fn send(&self, ctx: &DispatchContext, channel: ChannelConfig<'_>) -> SendResult {
        let message = formatters::render(ctx, channel, &self.texts);

        match (channel, message) {
            (ChannelConfig::Email(config), FormattedMessage::Email(message)) => {
                self.send_email(config, message).await
            }
            (ChannelConfig::Discord(config), FormattedMessage::Discord(message)) => {
                (self.senders.discord.send(config, &message).await, None)
            }
            (ChannelConfig::Gotify(config), FormattedMessage::Gotify(message)) => {
                (self.senders.gotify.send(config, &message).await, None)
            }
            (ChannelConfig::Telegram(config), FormattedMessage::Telegram(message)) => {
                (self.senders.telegram.send(config, &message).await, None)
            }
            (ChannelConfig::Slack(config), FormattedMessage::Slack(message)) => {
                (self.senders.slack.send(config, &message).await, None)
            }
            (channel, message) => (Err(mismatch(channel.kind(), message.kind()).into()), None),
        }
    }

    /// Fills the html body best-effort, then sends.
    async fn send_email(&self, config: &EmailConfig, mut message: EmailMessage) -> SendResult {
        let degradation = match self.renderer.render(&message.template).await {
            Ok(html) => {
                message.html = html;
                None
            }
            Err(error) => {
                warn!(error = %error, "Email template rendering failed, sending without body");
                Some(RenderDegradation::from(error))
            }
        };

        (self.senders.email.send(config, &message).await, degradation)
    }
}

fn mismatch(channel: ChannelKind, produced: ChannelKind) -> FormatterError {
    FormatterError {
        channel: channel.to_string(),
        reason: format!("formatter produced {produced} output"),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

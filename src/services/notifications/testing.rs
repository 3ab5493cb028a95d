//! In-memory sender and renderer doubles for dispatcher tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::dispatcher::NotificationDispatcher;
use super::provider::{ChannelSender, ChannelSenders, TemplateRenderer};
use crate::config::DispatchConfig;
use crate::error::{DeliveryError, RenderError};
use crate::models::{
    BuildFailedEmail, DiscordConfig, DiscordMessage, EmailConfig, EmailMessage, GotifyConfig,
    GotifyMessage, SlackConfig, SlackMessage, SubscriptionRecord, TelegramConfig,
    TelegramMessage, WireMessage,
};

pub enum Behavior {
    Succeed,
    Fail(DeliveryError),
    Panic,
}

/// Tracks how many sends are running at once across all doubles.
#[derive(Default)]
pub struct Gauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub struct RecordingSender<M> {
    name: &'static str,
    behavior: Behavior,
    delay: Option<Duration>,
    gauge: Arc<Gauge>,
    sent: Mutex<Vec<M>>,
}

impl<M> RecordingSender<M> {
    fn new(name: &'static str, gauge: Arc<Gauge>) -> Self {
        Self {
            name,
            behavior: Behavior::Succeed,
            delay: None,
            gauge,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<M>
    where
        M: Clone,
    {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl<C, M> ChannelSender<C, M> for RecordingSender<M>
where
    C: Sync,
    M: WireMessage + Clone + Send + Sync,
{
    async fn send(&self, _config: &C, message: &M) -> Result<(), DeliveryError> {
        message.to_payload()?;

        let current = self.gauge.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.gauge.peak.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.gauge.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.sent.lock().unwrap().push(message.clone());

        match &self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Panic => panic!("{} sender exploded", self.name),
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// One recording sender per channel kind.
pub struct Doubles {
    pub gauge: Arc<Gauge>,
    pub email: Arc<RecordingSender<EmailMessage>>,
    pub discord: Arc<RecordingSender<DiscordMessage>>,
    pub gotify: Arc<RecordingSender<GotifyMessage>>,
    pub telegram: Arc<RecordingSender<TelegramMessage>>,
    pub slack: Arc<RecordingSender<SlackMessage>>,
}

pub struct DoublesBuilder {
    gauge: Arc<Gauge>,
    email: RecordingSender<EmailMessage>,
    discord: RecordingSender<DiscordMessage>,
    gotify: RecordingSender<GotifyMessage>,
    telegram: RecordingSender<TelegramMessage>,
    slack: RecordingSender<SlackMessage>,
}

impl DoublesBuilder {
    pub fn new() -> Self {
        let gauge = Arc::new(Gauge::default());
        Self {
            email: RecordingSender::new("email", gauge.clone()),
            discord: RecordingSender::new("discord", gauge.clone()),
            gotify: RecordingSender::new("gotify", gauge.clone()),
            telegram: RecordingSender::new("telegram", gauge.clone()),
            slack: RecordingSender::new("slack", gauge.clone()),
            gauge,
        }
    }

    pub fn discord(mut self, behavior: Behavior) -> Self {
        self.discord.behavior = behavior;
        self
    }

    pub fn gotify(mut self, behavior: Behavior) -> Self {
        self.gotify.behavior = behavior;
        self
    }

    pub fn slack(mut self, behavior: Behavior) -> Self {
        self.slack.behavior = behavior;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.email.delay = Some(delay);
        self.discord.delay = Some(delay);
        self.gotify.delay = Some(delay);
        self.telegram.delay = Some(delay);
        self.slack.delay = Some(delay);
        self
    }

    pub fn build(self) -> Doubles {
        Doubles {
            gauge: self.gauge,
            email: Arc::new(self.email),
            discord: Arc::new(self.discord),
            gotify: Arc::new(self.gotify),
            telegram: Arc::new(self.telegram),
            slack: Arc::new(self.slack),
        }
    }
}

impl Doubles {
    pub fn senders(&self) -> ChannelSenders {
        ChannelSenders {
            email: self.email.clone(),
            discord: self.discord.clone(),
            gotify: self.gotify.clone(),
            telegram: self.telegram.clone(),
            slack: self.slack.clone(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.email.calls()
            + self.discord.calls()
            + self.gotify.calls()
            + self.telegram.calls()
            + self.slack.calls()
    }
}

pub struct FixedRenderer(pub &'static str);

#[async_trait]
impl TemplateRenderer for FixedRenderer {
    async fn render(&self, _input: &BuildFailedEmail) -> Result<String, RenderError> {
        Ok(self.0.to_string())
    }
}

pub struct FailingRenderer;

#[async_trait]
impl TemplateRenderer for FailingRenderer {
    async fn render(&self, _input: &BuildFailedEmail) -> Result<String, RenderError> {
        Err(RenderError::new("template missing"))
    }
}

pub fn dispatch_config(max_concurrent_sends: usize) -> DispatchConfig {
    DispatchConfig {
        max_concurrent_sends,
        timezone: Some("UTC".to_string()),
        ..DispatchConfig::default()
    }
}

pub fn dispatcher(doubles: &Doubles, renderer: Arc<dyn TemplateRenderer>) -> NotificationDispatcher {
    NotificationDispatcher::new(doubles.senders(), renderer, &dispatch_config(8))
        .expect("valid dispatch config")
}

/// A subscription with every channel configured.
pub fn full_record(id: &str, owner_id: &str) -> SubscriptionRecord {
    SubscriptionRecord {
        email: Some(EmailConfig {
            smtp_server: "smtp.test".to_string(),
            smtp_port: 587,
            username: "bot".to_string(),
            password: "secret".to_string(),
            from_address: "ci@test".to_string(),
            to_addresses: vec!["dev@test".to_string()],
            decoration: false,
        }),
        discord: Some(DiscordConfig {
            webhook_url: "https://discord.test/hook".to_string(),
            decoration: false,
        }),
        gotify: Some(GotifyConfig {
            server_url: "https://push.test".to_string(),
            app_token: "tok".to_string(),
            priority: 5,
            decoration: false,
        }),
        telegram: Some(telegram_config(false)),
        slack: Some(SlackConfig {
            webhook_url: "https://hooks.slack.test/x".to_string(),
            channel: None,
            decoration: false,
        }),
        ..SubscriptionRecord::new(id, owner_id)
    }
}

pub fn telegram_config(decoration: bool) -> TelegramConfig {
    TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
        decoration,
    }
}

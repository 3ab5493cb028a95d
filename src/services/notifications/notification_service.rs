//! Entry point for upstream event producers.
//!
//! Resolves the subscriptions interested in a build failure and dispatches to them.

use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use super::dispatcher::NotificationDispatcher;
use super::resolver::SubscriptionResolver;
use crate::error::AppResult;
use crate::models::{DispatchReport, EventPayload};

/// Notification service tying subscription lookup to dispatch.
#[derive(Clone)]
pub struct NotificationService {
    resolver: Arc<dyn SubscriptionResolver>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl NotificationService {
    /// Creates a new NotificationService
    ///
    /// # Arguments
    /// * `resolver` - Source of subscription records
    /// * `dispatcher` - Dispatcher holding the channel senders
    pub fn new(
        resolver: Arc<dyn SubscriptionResolver>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Notifies every subscriber of `event.owner_id` about a failed build.
    ///
    /// # Returns
    /// The per-channel report. Errors only for an invalid event or a
    /// failed subscription lookup; delivery failures are in the report.
    #[instrument(skip_all, fields(owner_id = %event.owner_id))]
    pub async fn notify_build_failure(&self, event: EventPayload) -> AppResult<DispatchReport> {
        event.validate()?;

        let subscriptions = self
            .resolver
            .find_subscriptions(event.category(), &event.owner_id)
            .await?;

        if subscriptions.is_empty() {
            info!("No subscriptions for build failure");
            return Ok(DispatchReport::default());
        }

        self.dispatcher.dispatch(event, &subscriptions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ChannelKind, EventCategory, SubscriptionRecord};
    use crate::services::notifications::formatters::test_support::sample_event;
    use crate::services::notifications::resolver::StaticResolver;
    use crate::services::notifications::testing::{
        DoublesBuilder, FixedRenderer, dispatcher, full_record, telegram_config,
    };
    use async_trait::async_trait;

    struct UnavailableResolver;

    #[async_trait]
    impl SubscriptionResolver for UnavailableResolver {
        async fn find_subscriptions(
            &self,
            _category: EventCategory,
            owner_id: &str,
        ) -> AppResult<Vec<SubscriptionRecord>> {
            Err(AppError::Resolver {
                owner_id: owner_id.to_string(),
                source: anyhow::anyhow!("store offline"),
            })
        }
    }

    #[tokio::test]
    async fn test_notifies_only_the_event_owner() {
        let doubles = DoublesBuilder::new().build();
        let other = SubscriptionRecord {
            telegram: Some(telegram_config(false)),
            ..SubscriptionRecord::new("n2", "u2")
        };
        let service = NotificationService::new(
            Arc::new(StaticResolver::new(vec![full_record("n1", "u1"), other])),
            Arc::new(dispatcher(&doubles, Arc::new(FixedRenderer("<p/>")))),
        );

        let report = service.notify_build_failure(sample_event()).await.unwrap();

        assert_eq!(report.len(), ChannelKind::ALL.len());
        assert!(report.outcomes().iter().all(|o| o.subscription_id == "n1"));
        assert_eq!(doubles.telegram.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_subscribers_sends_nothing() {
        let doubles = DoublesBuilder::new().build();
        let service = NotificationService::new(
            Arc::new(StaticResolver::default()),
            Arc::new(dispatcher(&doubles, Arc::new(FixedRenderer("<p/>")))),
        );

        let report = service.notify_build_failure(sample_event()).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(doubles.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolver_failure_propagates() {
        let doubles = DoublesBuilder::new().build();
        let service = NotificationService::new(
            Arc::new(UnavailableResolver),
            Arc::new(dispatcher(&doubles, Arc::new(FixedRenderer("<p/>")))),
        );

        let result = service.notify_build_failure(sample_event()).await;

        match result {
            Err(AppError::Resolver { owner_id, .. }) => assert_eq!(owner_id, "u1"),
            other => panic!("Expected Resolver error, got {:?}", other),
        }
        assert_eq!(doubles.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_event_skips_lookup() {
        let doubles = DoublesBuilder::new().build();
        let service = NotificationService::new(
            Arc::new(UnavailableResolver),
            Arc::new(dispatcher(&doubles, Arc::new(FixedRenderer("<p/>")))),
        );
        let event = EventPayload {
            owner_id: String::new(),
            ..sample_event()
        };

        let result = service.notify_build_failure(event).await;

        assert!(matches!(result, Err(AppError::ValidationErrors { .. })));
    }
}

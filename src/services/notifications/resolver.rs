//! Subscription lookup boundary.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{EventCategory, SubscriptionRecord};

/// Returns the subscriptions of `owner_id` that opted into `category`.
///
/// Implementations are read-only and may return an empty list.
#[async_trait]
pub trait SubscriptionResolver: Send + Sync {
    async fn find_subscriptions(
        &self,
        category: EventCategory,
        owner_id: &str,
    ) -> AppResult<Vec<SubscriptionRecord>>;
}

/// Resolver over a fixed list, matching on owner only.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    records: Vec<SubscriptionRecord>,
}

impl StaticResolver {
    pub fn new(records: Vec<SubscriptionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SubscriptionResolver for StaticResolver {
    async fn find_subscriptions(
        &self,
        _category: EventCategory,
        owner_id: &str,
    ) -> AppResult<Vec<SubscriptionRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

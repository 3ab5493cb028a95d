//! Per-channel dispatch outcomes.

use serde::Serialize;

use super::subscription::ChannelKind;
use crate::error::{DeliveryError, RenderDegradation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum DispatchStatus {
    Delivered,
    Failed(DeliveryError),
}

/// Result of one (subscription, channel) send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub subscription_id: String,
    pub channel: ChannelKind,
    #[serde(flatten)]
    pub status: DispatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation: Option<RenderDegradation>,
    pub duration_ms: u64,
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DispatchStatus::Delivered)
    }

    pub fn error(&self) -> Option<&DeliveryError> {
        match &self.status {
            DispatchStatus::Delivered => None,
            DispatchStatus::Failed(err) => Some(err),
        }
    }
}

/// All outcomes of one dispatch, ordered by subscription then channel kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[DispatchOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<DispatchOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn delivered(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| o.is_delivered())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_delivered())
    }

    pub fn degraded(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| o.degradation.is_some())
    }

    /// True when every outcome is delivered. Vacuously true for an empty report.
    pub fn all_delivered(&self) -> bool {
        self.outcomes.iter().all(DispatchOutcome::is_delivered)
    }
}

impl IntoIterator for DispatchReport {
    type Item = DispatchOutcome;
    type IntoIter = std::vec::IntoIter<DispatchOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

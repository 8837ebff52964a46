use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use super::{MarketDataProvider, ProviderError};
use crate::domain::RawProviderMetrics;

#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(RawProviderMetrics),
    Fail(String),
}

/// Mock provider that records calls and returns a controlled response
///
/// Clones share the call log, so a clone handed to the analyzer can be
/// inspected from the test.
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: &'static str,
    outcome: MockOutcome,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<Pubkey>>>,
}

impl MockProvider {
    /// Provider that answers with an empty bag
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            outcome: MockOutcome::Respond(RawProviderMetrics::default()),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builder method to set the metrics returned on every call
    pub fn with_response(mut self, metrics: RawProviderMetrics) -> Self {
        self.outcome = MockOutcome::Respond(metrics);
        self
    }

    /// Builder method to make every call fail
    pub fn failing(mut self, reason: &str) -> Self {
        self.outcome = MockOutcome::Fail(reason.to_string());
        self
    }

    /// Builder method to sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<Pubkey> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, mint: &Pubkey) -> Result<RawProviderMetrics, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(*mint);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            MockOutcome::Respond(metrics) => Ok(metrics.clone()),
            MockOutcome::Fail(reason) => Err(ProviderError::Parse(reason.clone())),
        }
    }
}

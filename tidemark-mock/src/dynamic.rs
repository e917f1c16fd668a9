use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tidemark_core::connector::{BarsProvider, TidemarkConnector};
use tidemark_core::{Period, RawBars, SamplingInterval, TidemarkError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TidemarkError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One recorded `fetch_bars` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Requested symbol.
    pub symbol: String,
    /// Requested period.
    pub period: Period,
    /// Requested interval.
    pub interval: SamplingInterval,
}

#[derive(Default)]
struct InternalState {
    // `None` interval is the per-symbol default.
    bars_rules: HashMap<(String, Option<SamplingInterval>), MockBehavior<RawBars>>,
    calls: Vec<MockCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for every `fetch_bars` call on `symbol`.
    pub async fn set_bars_behavior(&self, symbol: &str, behavior: MockBehavior<RawBars>) {
        let mut guard = self.state.lock().await;
        guard.bars_rules.insert((symbol.to_string(), None), behavior);
    }

    /// Set the behavior for `symbol` at one sampling interval; takes precedence
    /// over the per-symbol behavior.
    pub async fn set_bars_behavior_for(
        &self,
        symbol: &str,
        interval: SamplingInterval,
        behavior: MockBehavior<RawBars>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .bars_rules
            .insert((symbol.to_string(), Some(interval)), behavior);
    }

    /// Return a copy of the call log, oldest first.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Symbols requested so far, in call order (repeats included).
    pub async fn requested_symbols(&self) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.calls.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.bars_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a configured behavior answer `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TidemarkConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn TidemarkConnector>, controller)
    }
}

impl TidemarkConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self as &dyn BarsProvider)
    }
}

#[async_trait]
impl BarsProvider for DynamicMockConnector {
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: SamplingInterval,
    ) -> Result<RawBars, TidemarkError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(MockCall {
                symbol: symbol.to_string(),
                period,
                interval,
            });
            guard
                .bars_rules
                .get(&(symbol.to_string(), Some(interval)))
                .or_else(|| guard.bars_rules.get(&(symbol.to_string(), None)))
                .cloned()
        };

        match behavior {
            Some(MockBehavior::Return(bars)) => Ok(bars),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TidemarkError::not_found(format!("bars for {symbol}"))),
        }
    }
}

use crate::error::MonitorError;
use alerter::Notifier;
use api_client::ExchangeClient;
use configuration::MonitorParams;
use signals::RsiEvaluator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod control;
pub mod error;
pub mod universe;

pub use control::{MonitorController, StartOutcome, StopOutcome};

/// The scanning half of the bot.
///
/// One instance owns everything a pass needs: the exchange client for the
/// catalog, the evaluator for per-symbol readings, the notifier for whatever
/// the policy flags, and the parameters that tie them together. Cloning is
/// cheap (all shared parts are behind `Arc`), which is how the controller
/// hands a copy to each spawned task.
#[derive(Clone)]
pub struct RsiMonitor {
    client: Arc<dyn ExchangeClient>,
    notifier: Arc<dyn Notifier>,
    evaluator: Arc<RsiEvaluator>,
    params: MonitorParams,
}

impl RsiMonitor {
    /// Creates a new `RsiMonitor` with all its required components.
    pub fn new(
        client: Arc<dyn ExchangeClient>,
        notifier: Arc<dyn Notifier>,
        params: MonitorParams,
    ) -> Result<Self, MonitorError> {
        let evaluator = Arc::new(RsiEvaluator::new(
            Arc::clone(&client),
            &params.timeframe,
            params.rsi_period,
        )?);

        Ok(Self {
            client,
            notifier,
            evaluator,
            params,
        })
    }

    /// The main monitoring loop. Runs one pass after another until `active`
    /// is cleared.
    pub async fn run(self, active: Arc<AtomicBool>) {
        tracing::info!("RSI monitoring started.");

        while active.load(Ordering::SeqCst) {
            if let Err(e) = self.run_pass(&active).await {
                tracing::error!(error = ?e, "Monitoring pass failed. Retrying after pause.");
            }
            tokio::time::sleep(self.params.interval).await;
        }

        // However the loop ends, it leaves the flag cleared.
        active.store(false, Ordering::SeqCst);
        tracing::info!("RSI monitoring stopped.");
    }

    /// Executes one full scan over the derivative universe.
    ///
    /// A catalog fetch failure aborts the whole pass. Per-symbol failures
    /// only skip that symbol, so one delisted or illiquid instrument cannot
    /// stall the scan. Between instruments the loop re-checks `active` so a
    /// stop request takes effect mid-pass.
    pub async fn run_pass(&self, active: &AtomicBool) -> Result<(), MonitorError> {
        let markets = self.client.fetch_markets().await?;
        tracing::info!("Markets fetched: {} pairs", markets.len());

        let symbols = universe::derivative_symbols(&markets);
        tracing::info!("Derivative pairs found: {}", symbols.len());

        for symbol in &symbols {
            if !active.load(Ordering::SeqCst) {
                break;
            }

            match self.evaluator.evaluate(symbol).await {
                Ok(value) => {
                    if let Some(alert) = signals::decide(symbol, value, &self.params) {
                        if let Err(e) = self.notifier.notify(&alert).await {
                            tracing::error!(error = ?e, "Failed to deliver alert for {}.", symbol);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = ?e, "Skipping {}: evaluation failed.", symbol);
                }
            }

            tokio::time::sleep(self.params.interval).await;
        }

        Ok(())
    }
}

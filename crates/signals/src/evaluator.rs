use crate::error::SignalError;
use api_client::ExchangeClient;
use rust_decimal::prelude::*;
use std::sync::Arc;
use ta::Next as _;
use ta::indicators::RelativeStrengthIndex as Rsi;

/// How many candles to request per evaluation. Plenty of history for the
/// indicator to converge at the default period of 14.
const KLINE_FETCH_LIMIT: usize = 200;

/// Computes the latest RSI reading for one symbol from fresh exchange data.
///
/// The evaluator is stateless between calls; every evaluation fetches its own
/// candle window and runs it through a fresh indicator, so a reading never
/// depends on what was computed for another symbol or an earlier pass.
pub struct RsiEvaluator {
    client: Arc<dyn ExchangeClient>,
    timeframe: String,
    period: usize,
}

impl RsiEvaluator {
    pub fn new(
        client: Arc<dyn ExchangeClient>,
        timeframe: &str,
        period: usize,
    ) -> Result<Self, SignalError> {
        if period == 0 {
            return Err(SignalError::InvalidParameters(
                "Indicator period cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            client,
            timeframe: timeframe.to_string(),
            period,
        })
    }

    /// Fetches recent candles for `symbol` and folds their closes through the
    /// oscillator, oldest first.
    ///
    /// Returns `Ok(None)` when the exchange has fewer closes than the
    /// indicator period. Exchange failures are passed up for the caller to
    /// handle per symbol.
    pub async fn evaluate(&self, symbol: &str) -> Result<Option<f64>, SignalError> {
        let klines = self
            .client
            .fetch_ohlcv(symbol, &self.timeframe, KLINE_FETCH_LIMIT)
            .await?;

        if klines.len() < self.period {
            tracing::warn!("Insufficient data for {}", symbol);
            return Ok(None);
        }

        let mut rsi = Rsi::new(self.period).map_err(|e| {
            SignalError::InvalidParameters(format!("Failed to initialize RSI: {:?}", e))
        })?;

        let mut value = None;
        for kline in &klines {
            // Convert to f64 for `ta` crate compatibility
            let close = kline.close.to_f64().ok_or_else(|| {
                SignalError::InvalidParameters("Failed to convert close to f64".to_string())
            })?;
            value = Some(rsi.next(close));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::error::ApiError;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Kline, MarketDescriptor};
    use rust_decimal::Decimal;

    /// Serves a fixed series of integer closes as 5m candles, oldest first.
    struct FixedCandles {
        closes: Vec<i64>,
    }

    #[async_trait]
    impl ExchangeClient for FixedCandles {
        async fn fetch_markets(&self) -> Result<Vec<MarketDescriptor>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_ohlcv(
            &self,
            _symbol: &str,
            _timeframe: &str,
            limit: usize,
        ) -> Result<Vec<Kline>, ApiError> {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            Ok(self
                .closes
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, close)| Kline {
                    open_time: start + Duration::minutes(5 * i as i64),
                    open: Decimal::from(*close),
                    high: Decimal::from(*close),
                    low: Decimal::from(*close),
                    close: Decimal::from(*close),
                    volume: Decimal::from(1),
                })
                .collect())
        }
    }

    struct FailingExchange;

    #[async_trait]
    impl ExchangeClient for FailingExchange {
        async fn fetch_markets(&self) -> Result<Vec<MarketDescriptor>, ApiError> {
            Err(ApiError::ApiError("exchange down".to_string()))
        }

        async fn fetch_ohlcv(
            &self,
            _symbol: &str,
            _timeframe: &str,
            _limit: usize,
        ) -> Result<Vec<Kline>, ApiError> {
            Err(ApiError::ApiError("exchange down".to_string()))
        }
    }

    fn evaluator(closes: Vec<i64>) -> RsiEvaluator {
        RsiEvaluator::new(Arc::new(FixedCandles { closes }), "5m", 14).unwrap()
    }

    #[tokio::test]
    async fn short_series_yields_no_reading() {
        let eval = evaluator((1..=5).collect());
        assert_eq!(eval.evaluate("BTC/USDT:USDT").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rising_closes_read_overbought() {
        let eval = evaluator((1..=60).collect());
        let value = eval.evaluate("BTC/USDT:USDT").await.unwrap().unwrap();
        assert!(value > 70.0, "rising market should read overbought, got {}", value);
        assert!(value <= 100.0);
    }

    #[tokio::test]
    async fn falling_closes_read_oversold() {
        let eval = evaluator((1..=60).rev().collect());
        let value = eval.evaluate("BTC/USDT:USDT").await.unwrap().unwrap();
        assert!(value < 30.0, "falling market should read oversold, got {}", value);
        assert!(value >= 0.0);
    }

    #[tokio::test]
    async fn exchange_failures_propagate() {
        let eval = RsiEvaluator::new(Arc::new(FailingExchange), "5m", 14).unwrap();
        assert!(eval.evaluate("BTC/USDT:USDT").await.is_err());
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(RsiEvaluator::new(Arc::new(FailingExchange), "5m", 0).is_err());
    }
}

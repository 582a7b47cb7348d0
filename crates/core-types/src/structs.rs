use crate::enums::AlertKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV candle for one instrument at one timeframe.
///
/// Candle series are always ordered oldest-first, so the most recent
/// candle is the last element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// One entry of the exchange's market catalog.
///
/// Symbols use the unified `BASE/QUOTE:SETTLE` form for derivative
/// contracts (e.g. "BTC/USDT:USDT") and `BASE/QUOTE` for spot markets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDescriptor {
    pub symbol: String,
    pub is_linear: bool,
    pub is_inverse: bool,
}

/// A notification produced by the signal policy when an instrument's
/// oscillator crosses a configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub symbol: String,
    /// The RSI value at the most recent candle close.
    pub value: f64,
}

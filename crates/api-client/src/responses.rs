use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to automatically map from JSON camelCase to Rust snake_case.

/// The outer envelope every Bybit v5 endpoint wraps its payload in.
///
/// `retCode` 0 means success; anything else carries an error description
/// in `retMsg` and usually a null `result`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitEnvelope<T> {
    pub ret_code: i64,
    pub ret_msg: String,
    pub result: Option<T>,
}

/// One page of the instrument catalog from `GET /v5/market/instruments-info`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsResult {
    pub list: Vec<BybitInstrument>,
    /// Empty once the last page has been served.
    #[serde(default)]
    pub next_page_cursor: String,
}

/// A single instrument entry of the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitInstrument {
    pub symbol: String,
    pub base_coin: String,
    pub quote_coin: String,
    /// Absent for spot markets.
    #[serde(default)]
    pub settle_coin: String,
    pub status: String,
    // There are more fields, but these are the most important for us.
}

/// The kline payload from `GET /v5/market/kline`.
#[derive(Debug, Deserialize)]
pub struct KlineResult {
    pub list: Vec<RawKline>,
}

/// One kline row. Bybit serializes rows as arrays of strings, newest first:
/// `[startTimeMs, open, high, low, close, volume, turnover]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
);

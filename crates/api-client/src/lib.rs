use crate::error::ApiError;
use crate::responses::{InstrumentsResult, KlineResult, RawKline};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use configuration::ExchangeConfig;
use core_types::{Kline, MarketDescriptor};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::str::FromStr;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{BybitEnvelope, BybitInstrument};

const BYBIT_BASE_URL: &str = "https://api.bybit.com";

/// The generic, abstract interface for the exchange's public market-data API.
/// This trait is the contract that the monitoring loop works against, allowing
/// the underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Fetches the full market catalog, spot and derivatives alike.
    async fn fetch_markets(&self) -> Result<Vec<MarketDescriptor>, ApiError>;

    /// Fetches up to `limit` recent candles for `symbol` at `timeframe`,
    /// ordered oldest-first.
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Kline>, ApiError>;
}

/// A concrete implementation of the `ExchangeClient` for the Bybit v5 API.
#[derive(Clone)]
pub struct BybitClient {
    client: reqwest::Client,
    base_url: String,
}

impl BybitClient {
    pub fn new(config: &ExchangeConfig) -> Self {
        let mut headers = HeaderMap::new();
        // Public market-data endpoints work without a key; attach one only
        // when configured.
        if !config.api_key.is_empty() {
            headers.insert(
                "X-BAPI-API-KEY",
                HeaderValue::from_str(&config.api_key).expect("Invalid API Key"),
            );
        }

        Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()
                .expect("Failed to build reqwest client"),
            base_url: BYBIT_BASE_URL.to_string(),
        }
    }

    async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::ApiError(text));
        }

        let envelope = serde_json::from_str::<BybitEnvelope<T>>(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if envelope.ret_code != 0 {
            return Err(ApiError::Bybit(envelope.ret_code, envelope.ret_msg));
        }

        envelope
            .result
            .ok_or_else(|| ApiError::Deserialization("Response envelope has no result".to_string()))
    }
}

#[async_trait]
impl ExchangeClient for BybitClient {
    async fn fetch_markets(&self) -> Result<Vec<MarketDescriptor>, ApiError> {
        let mut markets = Vec::new();

        // The catalog is served per category; each category listing pages
        // with a cursor.
        for category in ["spot", "linear", "inverse"] {
            let mut cursor = String::new();
            loop {
                let mut params = vec![
                    ("category", category.to_string()),
                    ("limit", "1000".to_string()),
                ];
                if !cursor.is_empty() {
                    params.push(("cursor", cursor.clone()));
                }

                let page: InstrumentsResult = self
                    .get_public("/v5/market/instruments-info", &params)
                    .await?;

                markets.extend(page.list.iter().map(|instrument| MarketDescriptor {
                    symbol: unified_symbol(instrument, category),
                    is_linear: category == "linear",
                    is_inverse: category == "inverse",
                }));

                cursor = page.next_page_cursor;
                if cursor.is_empty() {
                    break;
                }
            }
        }

        Ok(markets)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Kline>, ApiError> {
        let (category, id) = category_and_id(symbol)?;
        let interval = bybit_interval(timeframe)?;

        let params = [
            ("category", category.to_string()),
            ("symbol", id),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];

        let result: KlineResult = self.get_public("/v5/market/kline", &params).await?;

        klines_from_result(result)
    }
}

/// Builds the unified symbol for a catalog entry: `BASE/QUOTE:SETTLE` for
/// derivative contracts, `BASE/QUOTE` for spot.
fn unified_symbol(instrument: &BybitInstrument, category: &str) -> String {
    if category == "spot" || instrument.settle_coin.is_empty() {
        format!("{}/{}", instrument.base_coin, instrument.quote_coin)
    } else {
        format!(
            "{}/{}:{}",
            instrument.base_coin, instrument.quote_coin, instrument.settle_coin
        )
    }
}

/// Splits a unified symbol back into the Bybit category and exchange symbol
/// id, e.g. "BTC/USDT:USDT" -> ("linear", "BTCUSDT").
fn category_and_id(symbol: &str) -> Result<(&'static str, String), ApiError> {
    let (pair, settle) = match symbol.split_once(':') {
        Some((pair, settle)) => (pair, Some(settle)),
        None => (symbol, None),
    };

    let (base, quote) = pair
        .split_once('/')
        .ok_or_else(|| ApiError::InvalidData(format!("Malformed symbol: {}", symbol)))?;

    let category = match settle {
        None => "spot",
        // Inverse contracts settle in the base coin (e.g. "BTC/USD:BTC").
        Some(settle) if settle == base => "inverse",
        Some(_) => "linear",
    };

    Ok((category, format!("{}{}", base, quote)))
}

/// Maps the monitor's timeframe tokens onto Bybit v5 kline interval codes.
fn bybit_interval(timeframe: &str) -> Result<&'static str, ApiError> {
    let interval = match timeframe {
        "1m" => "1",
        "3m" => "3",
        "5m" => "5",
        "15m" => "15",
        "30m" => "30",
        "1h" => "60",
        "2h" => "120",
        "4h" => "240",
        "6h" => "360",
        "12h" => "720",
        "1d" => "D",
        "1w" => "W",
        "1M" => "M",
        other => {
            return Err(ApiError::InvalidData(format!(
                "Unsupported timeframe: {}",
                other
            )));
        }
    };
    Ok(interval)
}

/// Converts a kline payload into an oldest-first candle series.
fn klines_from_result(result: KlineResult) -> Result<Vec<Kline>, ApiError> {
    let mut klines = result
        .list
        .iter()
        .map(kline_from_raw)
        .collect::<Result<Vec<Kline>, ApiError>>()?;

    // Bybit serves rows newest-first; candle series are oldest-first.
    klines.reverse();

    Ok(klines)
}

fn kline_from_raw(raw: &RawKline) -> Result<Kline, ApiError> {
    let start_ms = raw
        .0
        .parse::<i64>()
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;

    Ok(Kline {
        open_time: Utc
            .timestamp_millis_opt(start_ms)
            .single()
            .ok_or_else(|| ApiError::InvalidData(format!("Invalid open_time: {}", raw.0)))?,
        open: Decimal::from_str(&raw.1).map_err(|e| ApiError::Deserialization(e.to_string()))?,
        high: Decimal::from_str(&raw.2).map_err(|e| ApiError::Deserialization(e.to_string()))?,
        low: Decimal::from_str(&raw.3).map_err(|e| ApiError::Deserialization(e.to_string()))?,
        close: Decimal::from_str(&raw.4).map_err(|e| ApiError::Deserialization(e.to_string()))?,
        volume: Decimal::from_str(&raw.5).map_err(|e| ApiError::Deserialization(e.to_string()))?,
    })
}

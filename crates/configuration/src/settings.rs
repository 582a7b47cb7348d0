use serde::Deserialize;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub monitor: MonitorParams,
}

/// Credentials for the exchange API.
///
/// The monitor only consumes public market-data endpoints, so both values
/// may be left empty; when a key is present it is attached to every request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
}

/// Credentials for the Telegram Bot API.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelegramConfig {
    /// The bot token issued by BotFather.
    #[serde(default)]
    pub token: String,
    /// The chat that receives alert notifications.
    #[serde(default)]
    pub chat_id: String,
}

/// Parameters of the monitoring loop and its signal policy.
///
/// These are fixed at process start; there is no runtime mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorParams {
    /// The candle timeframe the oscillator is computed on (e.g. "5m").
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    /// The RSI lookback window, in candles.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    /// RSI at or above this level marks an instrument as overbought.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,
    /// RSI at or below this level marks an instrument as oversold.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
    /// The pause between instruments and between passes. This is what keeps
    /// the loop inside the exchange's request-rate budget.
    #[serde(with = "humantime_serde", default = "default_interval")]
    pub interval: Duration,
    /// Strong derivative pairs: never shorted, and the only pairs eligible
    /// for buy alerts.
    #[serde(default = "default_strong_pairs")]
    pub strong_pairs: Vec<String>,
}

impl Default for MonitorParams {
    fn default() -> Self {
        Self {
            timeframe: default_timeframe(),
            rsi_period: default_rsi_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            interval: default_interval(),
            strong_pairs: default_strong_pairs(),
        }
    }
}

fn default_timeframe() -> String {
    "5m".to_string()
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_strong_pairs() -> Vec<String> {
    vec![
        "BTC/USDT:USDT".to_string(),
        "ETH/USDT:USDT".to_string(),
        "BNB/USDT:USDT".to_string(),
        "SOL/USDT:USDT".to_string(),
        "XRP/USDT:USDT".to_string(),
    ]
}

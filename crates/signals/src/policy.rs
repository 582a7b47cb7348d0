use configuration::MonitorParams;
use core_types::{Alert, AlertKind};

/// Applies the alerting policy to one symbol's RSI reading.
///
/// The rules are checked in a fixed order:
/// 1. No reading, or a NaN reading, never alerts.
/// 2. RSI at or above the overbought threshold flags a short candidate,
///    unless the symbol is one of the strong pairs.
/// 3. RSI at or below the oversold threshold flags a buy candidate, but
///    only for the strong pairs.
///
/// Note the asymmetry: strong pairs are exempt from short alerts and are at
/// the same time the only pairs eligible for buy alerts.
pub fn decide(symbol: &str, value: Option<f64>, params: &MonitorParams) -> Option<Alert> {
    let value = value?;
    if value.is_nan() {
        return None;
    }

    let is_strong = params.strong_pairs.iter().any(|pair| pair == symbol);

    if value >= params.rsi_overbought && !is_strong {
        return Some(Alert {
            kind: AlertKind::Short,
            symbol: symbol.to_string(),
            value,
        });
    }

    if value <= params.rsi_oversold && is_strong {
        return Some(Alert {
            kind: AlertKind::Buy,
            symbol: symbol.to_string(),
            value,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MonitorParams {
        MonitorParams::default()
    }

    #[test]
    fn overbought_threshold_is_inclusive() {
        let p = params();
        assert!(decide("FOO/USDT:USDT", Some(69.99), &p).is_none());

        let alert = decide("FOO/USDT:USDT", Some(70.0), &p).unwrap();
        assert_eq!(alert.kind, AlertKind::Short);
        assert_eq!(alert.symbol, "FOO/USDT:USDT");
        assert_eq!(alert.value, 70.0);

        assert!(decide("FOO/USDT:USDT", Some(70.01), &p).is_some());
    }

    #[test]
    fn strong_pairs_are_never_short_candidates() {
        let p = params();
        assert!(decide("BTC/USDT:USDT", Some(99.0), &p).is_none());
        assert!(decide("ETH/USDT:USDT", Some(70.0), &p).is_none());
    }

    #[test]
    fn oversold_threshold_is_inclusive_for_strong_pairs() {
        let p = params();
        assert!(decide("BTC/USDT:USDT", Some(30.01), &p).is_none());

        let alert = decide("BTC/USDT:USDT", Some(30.0), &p).unwrap();
        assert_eq!(alert.kind, AlertKind::Buy);
        assert_eq!(alert.symbol, "BTC/USDT:USDT");

        assert!(decide("BTC/USDT:USDT", Some(29.99), &p).is_some());
    }

    #[test]
    fn oversold_outside_strong_pairs_is_ignored() {
        let p = params();
        assert!(decide("FOO/USDT:USDT", Some(5.0), &p).is_none());
        assert!(decide("FOO/USDT:USDT", Some(30.0), &p).is_none());
    }

    #[test]
    fn absent_or_nan_readings_never_alert() {
        let p = params();
        assert!(decide("FOO/USDT:USDT", None, &p).is_none());
        assert!(decide("FOO/USDT:USDT", Some(f64::NAN), &p).is_none());
        assert!(decide("BTC/USDT:USDT", Some(f64::NAN), &p).is_none());
    }

    #[test]
    fn midrange_readings_never_alert() {
        let p = params();
        assert!(decide("FOO/USDT:USDT", Some(50.0), &p).is_none());
        assert!(decide("BTC/USDT:USDT", Some(50.0), &p).is_none());
    }
}

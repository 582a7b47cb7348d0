use core_types::MarketDescriptor;

/// Selects the derivative symbols to scan from the full market catalog.
///
/// Spot markets are dropped; linear and inverse contracts are kept in the
/// order the catalog listed them, so every pass walks the universe the same
/// way.
pub fn derivative_symbols(markets: &[MarketDescriptor]) -> Vec<String> {
    markets
        .iter()
        .filter(|market| market.is_linear || market.is_inverse)
        .map(|market| market.symbol.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(symbol: &str, is_linear: bool, is_inverse: bool) -> MarketDescriptor {
        MarketDescriptor {
            symbol: symbol.to_string(),
            is_linear,
            is_inverse,
        }
    }

    #[test]
    fn keeps_derivatives_and_drops_spot() {
        let catalog = vec![
            market("BTC/USDT", false, false),
            market("BTC/USDT:USDT", true, false),
            market("BTC/USD:BTC", false, true),
            market("ETH/USDT", false, false),
            market("ETH/USDT:USDT", true, false),
        ];

        assert_eq!(
            derivative_symbols(&catalog),
            vec!["BTC/USDT:USDT", "BTC/USD:BTC", "ETH/USDT:USDT"]
        );
    }

    #[test]
    fn preserves_catalog_order() {
        let catalog = vec![
            market("ZEC/USDT:USDT", true, false),
            market("AAVE/USDT:USDT", true, false),
            market("MNT/USDT:USDT", true, false),
        ];

        assert_eq!(
            derivative_symbols(&catalog),
            vec!["ZEC/USDT:USDT", "AAVE/USDT:USDT", "MNT/USDT:USDT"]
        );
    }

    #[test]
    fn empty_catalog_yields_empty_universe() {
        assert!(derivative_symbols(&[]).is_empty());
    }
}

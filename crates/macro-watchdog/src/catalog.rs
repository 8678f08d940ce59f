//! Instrument Catalog
//!
//! The fixed universe this watchdog audits: FRED series, FINRA margin debt,
//! risk-sentiment tickers, metal futures, sector ETFs, global index ETFs and
//! crypto pairs. Everything downstream (plan, tools, digest) resolves names
//! through this module.

/// Result-set keys used by the scoring engine
pub mod keys {
    pub const DEBT_TO_GDP: &str = "GFDEGDQ188S";
    pub const FED_FUNDS: &str = "FEDFUNDS";
    pub const INDUSTRIAL_PRODUCTION: &str = "INDPRO";
    pub const M2: &str = "M2SL";
    pub const REVERSE_REPO: &str = "RRPONTSYD";
    pub const HOUSING_STARTS: &str = "HOUST";
    pub const MORTGAGE_RATE: &str = "MORTGAGE30US";
    pub const YIELD_CURVE: &str = "T10Y2Y";
    pub const CONSUMER_SENTIMENT: &str = "UMCSENT";
    pub const UNEMPLOYMENT: &str = "UNRATE";

    pub const MARGIN_DEBT: &str = "Margin Debt";
    pub const MARKET_SENTIMENT: &str = "Market Sentiment";
    pub const METALS: &str = "Metals";
    pub const CRYPTO: &str = "Crypto";
    pub const GLOBAL_MARKETS: &str = "Global Markets";
    pub const SECTOR_PERFORMANCE: &str = "Sector Performance";
}

/// Friendly names for the FRED series in the audit
pub const FRED_SERIES: &[(&str, &str)] = &[
    ("GFDEGDQ188S", "US Debt-to-GDP Ratio (%)"),
    ("FEDFUNDS", "Fed Funds Rate (%)"),
    ("INDPRO", "Industrial Production Index"),
    ("M2SL", "M2 Money Supply ($ Billions)"),
    ("RRPONTSYD", "Reverse Repo Volume ($ Billions)"),
    ("T10Y2Y", "10-Year minus 2-Year Treasury Spread"),
    ("UMCSENT", "Consumer Sentiment (Univ. of Michigan)"),
    ("UNRATE", "Unemployment Rate (%)"),
    ("HOUST", "Housing Starts (New Privately Owned)"),
    ("MORTGAGE30US", "30-Year Fixed Rate Mortgage Average"),
];

/// Friendly name for a FRED series id; falls back to the id itself
pub fn series_name(series_id: &str) -> &str {
    FRED_SERIES
        .iter()
        .find(|(id, _)| *id == series_id)
        .map_or(series_id, |(_, name)| *name)
}

/// Metal futures: (Yahoo symbol, display name)
pub const METAL_SYMBOLS: &[(&str, &str)] = &[
    ("GC=F", "Gold"),
    ("SI=F", "Silver"),
    ("HG=F", "Copper"),
    ("PL=F", "Platinum"),
];

/// Sector ETFs tracked for rotation analysis (SPY included as the benchmark)
pub const SECTOR_SYMBOLS: &[&str] = &["XLK", "XLE", "XLP", "XLU", "XLV", "XLY", "XLI", "SPY"];

/// Global index ETFs (SPY included for divergence comparison)
pub const GLOBAL_SYMBOLS: &[&str] = &["EZU", "EWJ", "EEM", "SPY"];

/// Crypto pairs used as the risk gauge
pub const CRYPTO_SYMBOLS: &[&str] = &["BTC-USD", "ETH-USD"];

/// Risk-sentiment tickers
pub mod sentiment_symbols {
    pub const VIX: &str = "^VIX";
    pub const SP500: &str = "^GSPC";
    pub const HIGH_YIELD: &str = "HYG";
    pub const TREASURIES: &str = "TLT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_series_resolve_to_friendly_names() {
        assert_eq!(series_name("INDPRO"), "Industrial Production Index");
        assert_eq!(series_name("M2SL"), "M2 Money Supply ($ Billions)");
    }

    #[test]
    fn unknown_series_fall_back_to_the_id() {
        assert_eq!(series_name("XYZ123"), "XYZ123");
    }
}

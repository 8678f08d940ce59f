//! Scoring & Synthesis Engine
//!
//! `synthesize` is the core of the watchdog: a pure function from a
//! `ResultSet` to a `Report`. It never fails; any dimension with missing,
//! error-shaped or unparseable inputs is silently skipped, and the report
//! degrades to whatever the remaining data supports. Given identical inputs
//! it produces byte-identical output.

mod allocations;
mod insights;
mod narrative;
mod score;

pub use allocations::Recommendation;
pub use score::Verdict;

use crate::catalog::keys;
use crate::observation::ResultSet;
use crate::report::Report;

/// A scalar indicator ready for scoring: raw text for interpolation plus the
/// parsed number for comparisons.
#[derive(Clone, Debug)]
pub(crate) struct Indicator {
    pub display: String,
    pub value: f64,
}

/// Scalar inputs extracted from the result set.
///
/// A value that fails numeric coercion is dropped here, so every downstream
/// rule sees it as absent rather than tripping over a non-numeric string.
#[derive(Clone, Debug, Default)]
pub(crate) struct Snapshot {
    pub debt_to_gdp: Option<Indicator>,
    pub indpro: Option<Indicator>,
    pub m2: Option<Indicator>,
    pub reverse_repo: Option<Indicator>,
    pub housing_starts: Option<Indicator>,
    pub mortgage_rate: Option<Indicator>,
    pub yield_curve: Option<Indicator>,
    pub consumer_sentiment: Option<Indicator>,
    pub vix: Option<f64>,
    pub risk_ratio: Option<f64>,
}

impl Snapshot {
    fn extract(results: &ResultSet) -> Self {
        let indicator = |key: &str| {
            results.scalar(key).and_then(|s| {
                s.value.as_f64().map(|value| Indicator {
                    display: s.value.to_string(),
                    value,
                })
            })
        };

        let sentiment = results.sentiment();

        Self {
            debt_to_gdp: indicator(keys::DEBT_TO_GDP),
            indpro: indicator(keys::INDUSTRIAL_PRODUCTION),
            m2: indicator(keys::M2),
            reverse_repo: indicator(keys::REVERSE_REPO),
            housing_starts: indicator(keys::HOUSING_STARTS),
            mortgage_rate: indicator(keys::MORTGAGE_RATE),
            yield_curve: indicator(keys::YIELD_CURVE),
            consumer_sentiment: indicator(keys::CONSUMER_SENTIMENT),
            vix: sentiment.and_then(|s| s.vix),
            risk_ratio: sentiment.and_then(|s| s.risk_ratio),
        }
    }
}

/// Analyze an aggregated result set into score, verdict, insights,
/// allocations and narrative.
pub fn synthesize(results: &ResultSet) -> Report {
    let snap = Snapshot::extract(results);
    let metals = results.metals();

    // Score contribution of every dimension except margin debt.
    let mut score = score::market_score(&snap, metals);

    // Sector rotation: notes plus the momenta the allocation rules reuse.
    let (sector_notes, momentum) = insights::sector_notes(results.sectors());

    // Base allocation pass against the pre-margin-debt score.
    let inflation_risk = metals.is_some_and(|m| m.values().any(|q| q.change_5d_pct > 3.0));
    let mut allocations = allocations::base_allocations(score, inflation_risk, &momentum);

    // Factor insights in their fixed report order.
    let mut factors = Vec::new();
    factors.extend(insights::core_economy(&snap));
    factors.extend(insights::liquidity(&snap));
    factors.extend(insights::housing(&snap));
    factors.extend(insights::yield_curve(&snap));
    factors.extend(insights::sentiment_risk(&snap));

    let pulse = insights::global_crypto(results.crypto(), results.global_markets()).map(
        |(line, pulse)| {
            factors.push(line);
            pulse
        },
    );

    if let Some(line) = insights::margin_debt_line(results.margin_debt()) {
        factors.push(line);
        // Leveraged positioning reads as risk-on; the insight and the bonus
        // travel together.
        score += 1;
        allocations::margin_modulations(&mut allocations, pulse.as_ref(), score);
    }

    let verdict = Verdict::from_score(score);
    let narrative = narrative::for_score(score);

    Report {
        score,
        verdict,
        factors,
        sector_notes,
        allocations,
        synthesis: narrative.synthesis,
        path_forward: narrative.path_forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{
        CryptoObservation, CryptoQuote, GlobalMarketsObservation, InstrumentQuote,
        MarginDebtObservation, MetalsObservation, Observation, ScalarObservation,
        SectorObservation, SentimentObservation, Trend,
    };
    use std::collections::BTreeMap;

    fn scalar(key: &str, value: &str) -> Observation {
        Observation::Scalar(ScalarObservation {
            indicator: crate::catalog::series_name(key).to_string(),
            value: value.into(),
            date: "2025-06-30".into(),
        })
    }

    fn sentiment(vix: Option<f64>, risk_ratio: Option<f64>) -> Observation {
        Observation::Sentiment(SentimentObservation {
            indicator: "Market Risk Sentiment".into(),
            vix,
            sp500_volume: Some(3_900_000_000),
            risk_ratio,
            hyg_price: None,
        })
    }

    fn metals(changes: &[(&str, f64)]) -> Observation {
        let metals = changes
            .iter()
            .map(|(name, change)| {
                (
                    (*name).to_string(),
                    InstrumentQuote {
                        price: 100.0,
                        change_5d_pct: *change,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        Observation::Metals(MetalsObservation {
            indicator: "Metal Commodities".into(),
            metals,
        })
    }

    fn crypto(btc_change: f64) -> Observation {
        let mut map = BTreeMap::new();
        map.insert(
            "BTC-USD".to_string(),
            CryptoQuote {
                price: 97_500.0,
                change_5d_pct: btc_change,
                trend: if btc_change > 0.0 {
                    Trend::Bullish
                } else {
                    Trend::Bearish
                },
            },
        );
        Observation::Crypto(CryptoObservation { crypto: map })
    }

    fn global(ezu: f64, spy: f64) -> Observation {
        let mut markets = BTreeMap::new();
        for (ticker, change) in [("EZU", ezu), ("SPY", spy)] {
            markets.insert(
                ticker.to_string(),
                InstrumentQuote {
                    price: 100.0,
                    change_5d_pct: change,
                },
            );
        }
        Observation::GlobalMarkets(GlobalMarketsObservation { markets })
    }

    fn sectors(entries: &[(&str, f64)]) -> Observation {
        Observation::Sectors(SectorObservation {
            returns: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        })
    }

    fn margin_debt(value: i64) -> Observation {
        Observation::MarginDebt(MarginDebtObservation {
            indicator: "FINRA Margin Debt".into(),
            value,
            date: "2025-06-30".into(),
            note: "Value in Millions".into(),
        })
    }

    #[test]
    fn empty_results_yield_neutral_defensive_report() {
        let report = synthesize(&ResultSet::new());

        assert_eq!(report.score, 0);
        assert_eq!(report.verdict, Verdict::Neutral);
        assert!(report.factors.is_empty());
        assert!(report.sector_notes.is_empty());
        assert_eq!(report.allocations, vec![Recommendation::Defensive]);
        assert!(report.synthesis.contains("conflicting signals"));
    }

    #[test]
    fn debt_and_indpro_alone_score_minus_one() {
        let mut results = ResultSet::new();
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "125"));
        results.insert(
            keys::INDUSTRIAL_PRODUCTION,
            scalar(keys::INDUSTRIAL_PRODUCTION, "104"),
        );

        let report = synthesize(&results);
        assert_eq!(report.score, -1);
        assert_eq!(report.verdict, Verdict::Caution);
        assert_eq!(report.factors.len(), 1);
        assert!(report.factors[0].contains("Core Economy"));
    }

    #[test]
    fn moderate_debt_band_scores_minus_one() {
        let mut results = ResultSet::new();
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "110"));

        assert_eq!(synthesize(&results).score, -1);
    }

    #[test]
    fn unparseable_scalar_reads_as_absent() {
        let mut results = ResultSet::new();
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "."));
        results.insert(
            keys::INDUSTRIAL_PRODUCTION,
            scalar(keys::INDUSTRIAL_PRODUCTION, "104"),
        );

        let report = synthesize(&results);
        // Only the IndPro +1 lands; the core-economy line needs both inputs.
        assert_eq!(report.score, 1);
        assert!(report.factors.is_empty());
    }

    #[test]
    fn vix_rules_cover_all_bands() {
        for (vix, expected) in [(35.0, -2), (25.0, -1), (15.0, 1)] {
            let mut results = ResultSet::new();
            results.insert(keys::MARKET_SENTIMENT, sentiment(Some(vix), None));
            assert_eq!(synthesize(&results).score, expected, "vix {vix}");
        }
    }

    #[test]
    fn metal_spike_deducts_once() {
        let mut results = ResultSet::new();
        results.insert(
            keys::METALS,
            metals(&[("Gold", 4.0), ("Silver", 5.0), ("Copper", 0.2)]),
        );

        let report = synthesize(&results);
        assert_eq!(report.score, -1);
        // Inflation hedge fires exactly once despite two qualifying metals.
        assert_eq!(
            report
                .allocations
                .iter()
                .filter(|r| **r == Recommendation::InflationHedge)
                .count(),
            1
        );
    }

    #[test]
    fn margin_debt_adds_insight_and_score_point() {
        let mut results = ResultSet::new();
        results.insert(keys::MARGIN_DEBT, margin_debt(935_000));

        let report = synthesize(&results);
        assert_eq!(report.score, 1);
        assert_eq!(report.factors.len(), 1);
        assert!(report.factors[0].contains("$935000M"));
        // Base allocations saw the pre-bonus score of zero.
        assert_eq!(report.allocations, vec![Recommendation::Defensive]);
    }

    #[test]
    fn crypto_modulation_requires_global_bundles() {
        // Margin debt present, BTC surging, but no global/crypto bundles:
        // the crypto-momentum rule must stay silent.
        let mut results = ResultSet::new();
        results.insert(keys::MARGIN_DEBT, margin_debt(900_000));
        results.insert(keys::MARKET_SENTIMENT, sentiment(Some(15.0), Some(1.1)));

        let report = synthesize(&results);
        assert!(report.score > 0);
        assert!(!report.allocations.contains(&Recommendation::CryptoMomentum));
    }

    #[test]
    fn crypto_momentum_fires_with_full_pulse() {
        let mut results = ResultSet::new();
        results.insert(keys::MARKET_SENTIMENT, sentiment(Some(15.0), Some(1.1)));
        results.insert(keys::CRYPTO, crypto(6.5));
        results.insert(keys::GLOBAL_MARKETS, global(2.5, 1.0));
        results.insert(keys::MARGIN_DEBT, margin_debt(900_000));

        let report = synthesize(&results);
        assert!(report.allocations.contains(&Recommendation::CryptoMomentum));
        assert!(report.allocations.contains(&Recommendation::GlobalValue));
    }

    #[test]
    fn deep_negative_score_wipes_allocations_to_cash() {
        // Debt > 120 (-2), IndPro < 100 (-1), VIX > 30 (-2) => -5.
        let mut results = ResultSet::new();
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "130"));
        results.insert(
            keys::INDUSTRIAL_PRODUCTION,
            scalar(keys::INDUSTRIAL_PRODUCTION, "97"),
        );
        results.insert(keys::MARKET_SENTIMENT, sentiment(Some(35.0), None));
        results.insert(keys::METALS, metals(&[("Gold", 4.5)]));
        results.insert(
            keys::SECTOR_PERFORMANCE,
            sectors(&[("XLK", 3.0), ("XLU", 1.0), ("XLI", 2.0), ("SPY", 1.5)]),
        );

        let report = synthesize(&results);
        assert_eq!(report.score, -6);
        assert_eq!(report.verdict, Verdict::Danger);
        assert_eq!(report.allocations, vec![Recommendation::CashIsKing]);
    }

    #[test]
    fn score_is_independent_of_result_insertion_order() {
        let build = |reversed: bool| {
            let mut entries = vec![
                (keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "125")),
                (
                    keys::INDUSTRIAL_PRODUCTION,
                    scalar(keys::INDUSTRIAL_PRODUCTION, "104"),
                ),
                (keys::MARKET_SENTIMENT, sentiment(Some(15.0), Some(1.2))),
                (keys::METALS, metals(&[("Gold", 4.0)])),
                (keys::MARGIN_DEBT, margin_debt(900_000)),
            ];
            if reversed {
                entries.reverse();
            }
            let mut results = ResultSet::new();
            for (key, obs) in entries {
                results.insert(key, obs);
            }
            synthesize(&results).score
        };

        assert_eq!(build(false), build(true));
    }

    #[test]
    fn synthesize_is_idempotent() {
        let mut results = ResultSet::new();
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "121.5"));
        results.insert(keys::M2, scalar(keys::M2, "21533.8"));
        results.insert(keys::MARKET_SENTIMENT, sentiment(Some(22.0), Some(0.9)));
        results.insert(keys::CRYPTO, crypto(-6.0));
        results.insert(keys::GLOBAL_MARKETS, global(0.5, 1.0));
        results.insert(
            keys::SECTOR_PERFORMANCE,
            sectors(&[("XLK", -1.0), ("XLU", 2.0), ("SPY", 0.3)]),
        );

        let first = synthesize(&results).render();
        let second = synthesize(&results).render();
        assert_eq!(first, second);
    }

    #[test]
    fn factor_order_is_fixed() {
        let mut results = ResultSet::new();
        // Insert out of report order on purpose.
        results.insert(keys::MARGIN_DEBT, margin_debt(900_000));
        results.insert(keys::CRYPTO, crypto(1.0));
        results.insert(keys::GLOBAL_MARKETS, global(0.1, 0.2));
        results.insert(keys::MARKET_SENTIMENT, sentiment(Some(18.0), None));
        results.insert(keys::YIELD_CURVE, scalar(keys::YIELD_CURVE, "-0.2"));
        results.insert(keys::MORTGAGE_RATE, scalar(keys::MORTGAGE_RATE, "6.9"));
        results.insert(keys::HOUSING_STARTS, scalar(keys::HOUSING_STARTS, "1400"));
        results.insert(keys::M2, scalar(keys::M2, "21000"));
        results.insert(
            keys::INDUSTRIAL_PRODUCTION,
            scalar(keys::INDUSTRIAL_PRODUCTION, "101"),
        );
        results.insert(keys::DEBT_TO_GDP, scalar(keys::DEBT_TO_GDP, "119"));

        let report = synthesize(&results);
        let order: Vec<_> = report
            .factors
            .iter()
            .map(|f| {
                f.trim_start_matches("• **")
                    .split("**")
                    .next()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(
            order,
            [
                "Core Economy",
                "Liquidity",
                "Housing Market",
                "Yield Curve",
                "Sentiment & Risk",
                "Global & Crypto",
                "Margin Debt",
            ]
        );
    }
}

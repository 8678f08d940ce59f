//! Factor Insights
//!
//! One templated insight line per economic dimension with sufficient data.
//! Template selection is threshold-driven; interpolations echo the raw
//! upstream values. A dimension missing its required inputs contributes no
//! line at all.

use std::collections::BTreeMap;

use super::Snapshot;
use crate::observation::{CryptoQuote, InstrumentQuote, MarginDebtObservation};

/// One-month sector momenta with zero defaults for missing tickers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct SectorMomentum {
    pub tech: f64,
    pub utilities: f64,
    pub energy: f64,
    pub industrials: f64,
    pub spy: f64,
}

/// Five-day moves read out of the Global & Crypto dimension, needed again by
/// the margin-debt allocation modulations
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GlobalPulse {
    pub btc_change: f64,
    pub ezu_change: f64,
    pub spy_change: f64,
}

pub(crate) fn core_economy(snap: &Snapshot) -> Option<String> {
    let debt = snap.debt_to_gdp.as_ref()?;
    let indpro = snap.indpro.as_ref()?;

    let msg = if indpro.value > 103.0 {
        format!(
            "The Core Economy shows surprising resilience with Industrial Production at {}, defying the weight of {}% Debt-to-GDP.",
            indpro.display, debt.display
        )
    } else if indpro.value < 100.0 {
        format!(
            "The Core Economy is buckling, with Industrial Production falling to {} under the pressure of {}% Debt-to-GDP.",
            indpro.display, debt.display
        )
    } else {
        format!(
            "The Core Economy is in a tug-of-war; Industrial Production ({}) signals activity, but the massive Debt-to-GDP ratio ({}%) acts as a long-term structural drag.",
            indpro.display, debt.display
        )
    };

    Some(format!("• **Core Economy**: {msg}"))
}

pub(crate) fn liquidity(snap: &Snapshot) -> Option<String> {
    let m2 = snap.m2.as_ref()?;

    let mut msg = format!(
        "System liquidity remains ample with M2 at ${}B, supporting asset prices.",
        m2.display
    );

    if let Some(rrp) = &snap.reverse_repo {
        if rrp.value > 1000.0 {
            msg = format!(
                "While M2 is high, ${}B is trapped in Reverse Repos, indicating banks are hoarding cash rather than lending it to the real economy.",
                rrp.display
            );
        }
    }

    Some(format!("• **Liquidity**: {msg}"))
}

pub(crate) fn housing(snap: &Snapshot) -> Option<String> {
    let starts = snap.housing_starts.as_ref()?;
    let mortgage = snap.mortgage_rate.as_ref()?;

    let msg = if mortgage.value > 7.0 {
        format!(
            "High borrowing costs ({}%) are freezing the Housing market, which will likely drag on GDP in coming quarters.",
            mortgage.display
        )
    } else if starts.value > 1500.0 {
        format!(
            "Despite rates at {}%, Housing Starts are booming ({}k), suggesting strong consumer demand.",
            mortgage.display, starts.display
        )
    } else {
        format!(
            "The Housing market is stabilizing with {}k starts and rates at {}%.",
            starts.display, mortgage.display
        )
    };

    Some(format!("• **Housing Market**: {msg}"))
}

pub(crate) fn yield_curve(snap: &Snapshot) -> Option<String> {
    let curve = snap.yield_curve.as_ref()?;

    let msg = if curve.value < 0.0 {
        format!(
            "The Yield Curve is **Inverted** ({}), a historically accurate warning that the continued tight policy is choking growth.",
            curve.display
        )
    } else {
        format!(
            "The Yield Curve is normal ({}), suggesting no immediate recessionary signal from the bond market.",
            curve.display
        )
    };

    Some(format!("• **Yield Curve**: {msg}"))
}

pub(crate) fn sentiment_risk(snap: &Snapshot) -> Option<String> {
    let sentiment = snap.consumer_sentiment.as_ref();
    let vix = snap.vix;

    if sentiment.is_none() && vix.is_none() {
        return None;
    }

    let sent_text = sentiment.map_or_else(|| "n/a".to_string(), |s| s.display.clone());
    let vix_text = vix.map_or_else(|| "n/a".to_string(), |v| format!("{v}"));

    let mut msg = format!(
        "Consumer Sentiment is neutral ({sent_text}), while the VIX ({vix_text}) shows a market comfortable with current risks."
    );

    if let Some(s) = sentiment {
        if s.value < 60.0 {
            msg = format!(
                "The consumer is deeply pessimistic (Sentiment {sent_text}), yet the stock market (VIX {vix_text}) seems ignoring this distress."
            );
        }
    }

    // Not an else-branch: an elevated VIX overrides the pessimism line too.
    if vix.is_some_and(|v| v > 20.0) {
        msg = format!("Fear has entered the market (VIX {vix_text}), aligning with weak consumer sentiment.");
    }

    Some(format!("• **Sentiment & Risk**: {msg}"))
}

pub(crate) fn global_crypto(
    crypto: Option<&BTreeMap<String, CryptoQuote>>,
    globe: Option<&BTreeMap<String, InstrumentQuote>>,
) -> Option<(String, GlobalPulse)> {
    let crypto = crypto?;
    let globe = globe?;

    let pulse = GlobalPulse {
        btc_change: crypto.get("BTC-USD").map_or(0.0, |q| q.change_5d_pct),
        ezu_change: globe.get("EZU").map_or(0.0, |q| q.change_5d_pct),
        spy_change: globe.get("SPY").map_or(0.0, |q| q.change_5d_pct),
    };

    let global_msg = if pulse.spy_change > pulse.ezu_change + 2.0 {
        "US Exceptionalism is in play; Wall St is outperforming Europe and Japan."
    } else if pulse.ezu_change > pulse.spy_change {
        "Global rotation is underway; capital is flowing into Europe/International markets."
    } else {
        "Global markets are moving in sync with the US."
    };

    let risk_msg = if pulse.btc_change > 5.0 {
        "screaming 'Risk-On' as Bitcoin rallies hard."
    } else if pulse.btc_change < -5.0 {
        "flashing warning signs as Crypto liquidity evaporates."
    } else {
        "quiet."
    };

    let line = format!(
        "• **Global & Crypto**: {global_msg} Bitcoin is {risk_msg} ({}%)",
        pulse.btc_change
    );

    Some((line, pulse))
}

pub(crate) fn margin_debt_line(margin: Option<&MarginDebtObservation>) -> Option<String> {
    let margin = margin?;
    Some(format!(
        "• **Margin Debt**: Investors are leveraging up with ${}M in margin debt, a signal of high risk appetite.",
        margin.value
    ))
}

/// Sector rotation notes plus the momenta the allocation rules reuse.
///
/// Missing tickers read as zero momentum, matching the zero defaults the
/// allocation thresholds were tuned against.
pub(crate) fn sector_notes(
    sectors: Option<&BTreeMap<String, f64>>,
) -> (Vec<String>, SectorMomentum) {
    let Some(sectors) = sectors else {
        return (Vec::new(), SectorMomentum::default());
    };

    let at = |key: &str| sectors.get(key).copied().unwrap_or(0.0);
    let momentum = SectorMomentum {
        tech: at("XLK"),
        utilities: at("XLU"),
        energy: at("XLE"),
        industrials: at("XLI"),
        spy: at("SPY"),
    };

    let mut notes = vec![format!("Market (SPY) 1-Month Trend: {}%", momentum.spy)];

    if momentum.tech > momentum.utilities {
        notes.push(format!(
            "Risk-On Signal: Tech ({}%) > Utilities ({}%).",
            momentum.tech, momentum.utilities
        ));
    } else {
        notes.push(format!(
            "Defensive Rotation: Utilities ({}%) > Tech ({}%).",
            momentum.utilities, momentum.tech
        ));
    }

    if momentum.industrials > momentum.spy {
        notes.push(format!(
            "Cyclical Strength: Industrials ({}%) leading.",
            momentum.industrials
        ));
    }

    (notes, momentum)
}

#[cfg(test)]
mod tests {
    use super::super::Indicator;
    use super::*;

    fn indicator(raw: &str) -> Option<Indicator> {
        Some(Indicator {
            display: raw.to_string(),
            value: raw.parse().unwrap(),
        })
    }

    #[test]
    fn core_economy_needs_both_inputs() {
        let mut snap = Snapshot::default();
        snap.debt_to_gdp = indicator("125");
        assert!(core_economy(&snap).is_none());

        snap.indpro = indicator("104");
        let line = core_economy(&snap).unwrap();
        assert!(line.contains("surprising resilience"));
        assert!(line.contains("104"));
        assert!(line.contains("125% Debt-to-GDP"));
    }

    #[test]
    fn buckling_economy_below_one_hundred() {
        let mut snap = Snapshot::default();
        snap.debt_to_gdp = indicator("121");
        snap.indpro = indicator("98.7");
        assert!(core_economy(&snap).unwrap().contains("is buckling"));
    }

    #[test]
    fn liquidity_prefers_the_reverse_repo_warning() {
        let mut snap = Snapshot::default();
        snap.m2 = indicator("21000");
        assert!(liquidity(&snap).unwrap().contains("remains ample"));

        snap.reverse_repo = indicator("1500");
        assert!(liquidity(&snap).unwrap().contains("trapped in Reverse Repos"));
    }

    #[test]
    fn housing_template_priority() {
        let mut snap = Snapshot::default();
        snap.housing_starts = indicator("1600");
        snap.mortgage_rate = indicator("7.2");
        // High rates win even when starts are booming.
        assert!(housing(&snap).unwrap().contains("freezing the Housing market"));

        snap.mortgage_rate = indicator("6.5");
        assert!(housing(&snap).unwrap().contains("booming"));
    }

    #[test]
    fn inverted_curve_is_flagged() {
        let mut snap = Snapshot::default();
        snap.yield_curve = indicator("-0.45");
        assert!(yield_curve(&snap).unwrap().contains("**Inverted**"));
    }

    #[test]
    fn vix_override_beats_pessimism() {
        let mut snap = Snapshot::default();
        snap.consumer_sentiment = indicator("55");
        snap.vix = Some(28.0);
        let line = sentiment_risk(&snap).unwrap();
        assert!(line.contains("Fear has entered the market (VIX 28)"));
    }

    #[test]
    fn sentiment_line_absent_without_any_input() {
        let snap = Snapshot::default();
        assert!(sentiment_risk(&snap).is_none());
    }

    #[test]
    fn global_crypto_needs_both_bundles() {
        let crypto: BTreeMap<String, CryptoQuote> = BTreeMap::new();
        assert!(global_crypto(Some(&crypto), None).is_none());
    }

    #[test]
    fn sector_notes_mark_cyclical_strength() {
        let sectors: BTreeMap<String, f64> = [
            ("XLK".to_string(), 2.0),
            ("XLU".to_string(), -1.0),
            ("XLI".to_string(), 3.5),
            ("SPY".to_string(), 2.1),
        ]
        .into_iter()
        .collect();

        let (notes, momentum) = sector_notes(Some(&sectors));
        assert_eq!(notes.len(), 3);
        assert!(notes[1].starts_with("Risk-On Signal"));
        assert!(notes[2].contains("Industrials (3.5%)"));
        assert!((momentum.energy - 0.0).abs() < f64::EPSILON);
    }
}

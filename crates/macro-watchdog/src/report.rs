//! Audit Report
//!
//! The immutable output of one audit: score, verdict, insight lines and
//! allocation recommendations, plus the text renderer that produces the
//! final report block and the fetched-data digest.

use serde::Serialize;

use crate::analysis::{Recommendation, Verdict};
use crate::observation::{Observation, ResultSet};

/// Composite output of `synthesize`
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Composite health score
    pub score: i32,

    /// Categorical bucket for the score
    pub verdict: Verdict,

    /// One insight line per dimension with sufficient data, fixed order
    pub factors: Vec<String>,

    /// Sector rotation notes; empty when no sector data was supplied
    pub sector_notes: Vec<String>,

    /// Ordered allocation recommendations
    pub allocations: Vec<Recommendation>,

    /// Strategic-outlook synthesis sentence
    pub synthesis: String,

    /// Strategic-outlook action sentence
    pub path_forward: String,
}

impl Report {
    /// Render the report block
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("🔎 FACTOR INSIGHTS:\n");
        for factor in &self.factors {
            out.push_str(factor);
            out.push('\n');
        }
        out.push('\n');

        out.push_str("🧭 STRATEGIC OUTLOOK:\n");
        out.push_str(&self.synthesis);
        out.push(' ');
        out.push_str(&self.path_forward);
        out.push_str("\n\n");

        out.push_str(&format!(
            "MACRO HEALTH SCORE: {} ({})\n\n",
            self.score, self.verdict
        ));

        if !self.sector_notes.is_empty() {
            out.push_str("📊 SECTOR ANALYSIS:\n");
            for note in &self.sector_notes {
                out.push_str("    - ");
                out.push_str(note);
                out.push('\n');
            }
            out.push('\n');
        }

        out.push_str("🤖 AI RECOMMENDATION:\n");
        for allocation in &self.allocations {
            out.push_str(&format!("    {allocation}\n"));
        }

        out
    }
}

/// Render the fetched-data digest: one line per result, in plan order.
pub fn digest(results: &ResultSet) -> String {
    let mut out = String::from("Analysis based on fetched data:\n");

    for (key, observation) in results.iter() {
        match observation {
            Observation::Error(failure) => {
                out.push_str(&format!("- {key}: ERROR - {}\n", failure.message));
            }
            Observation::Sentiment(s) => {
                out.push_str(&format!(
                    "- {key}: VIX={}, Volume={}\n",
                    s.vix.map_or_else(|| "n/a".to_string(), |v| v.to_string()),
                    s.sp500_volume
                        .map_or_else(|| "n/a".to_string(), |v| v.to_string()),
                ));
            }
            Observation::Metals(m) => {
                let parts: Vec<String> = m
                    .metals
                    .iter()
                    .map(|(name, q)| format!("{name}=${} ({}%)", q.price, q.change_5d_pct))
                    .collect();
                out.push_str(&format!("- {key}: {}\n", parts.join(", ")));
            }
            Observation::Crypto(c) => {
                let parts: Vec<String> = c
                    .crypto
                    .iter()
                    .map(|(ticker, q)| format!("{ticker}=${} ({}%)", q.price, q.change_5d_pct))
                    .collect();
                out.push_str(&format!("- {key}: {}\n", parts.join(", ")));
            }
            Observation::GlobalMarkets(g) => {
                let parts: Vec<String> = g
                    .markets
                    .iter()
                    .map(|(ticker, q)| format!("{ticker}=${} ({}%)", q.price, q.change_5d_pct))
                    .collect();
                out.push_str(&format!("- {key}: {}\n", parts.join(", ")));
            }
            Observation::Sectors(s) => {
                let parts: Vec<String> = s
                    .returns
                    .iter()
                    .map(|(ticker, pct)| format!("{ticker}={pct}%"))
                    .collect();
                out.push_str(&format!("- {key}: {}\n", parts.join(", ")));
            }
            Observation::Scalar(s) => {
                out.push_str(&format!(
                    "- {}: {} (as of {})\n",
                    s.indicator, s.value, s.date
                ));
            }
            Observation::MarginDebt(m) => {
                out.push_str(&format!(
                    "- {}: {} (as of {})\n",
                    m.indicator, m.value, m.date
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{ScalarObservation, SentimentObservation};

    fn sample_report() -> Report {
        Report {
            score: -1,
            verdict: Verdict::Caution,
            factors: vec!["• **Core Economy**: test line".into()],
            sector_notes: vec!["Market (SPY) 1-Month Trend: 2.1%".into()],
            allocations: vec![Recommendation::Defensive],
            synthesis: "The data paints a picture of fragility.".into(),
            path_forward: "The prudent path ahead is to hold cash.".into(),
        }
    }

    #[test]
    fn render_emits_sections_in_order() {
        let text = sample_report().render();

        let insights = text.find("🔎 FACTOR INSIGHTS:").unwrap();
        let outlook = text.find("🧭 STRATEGIC OUTLOOK:").unwrap();
        let score = text.find("MACRO HEALTH SCORE: -1 (CAUTION (Hedge))").unwrap();
        let sectors = text.find("📊 SECTOR ANALYSIS:").unwrap();
        let recs = text.find("🤖 AI RECOMMENDATION:").unwrap();

        assert!(insights < outlook && outlook < score && score < sectors && sectors < recs);
        assert!(text.contains("    - Market (SPY) 1-Month Trend: 2.1%"));
        assert!(text.contains("    🛡️ DEFENSIVE: Overweight Healthcare (XLV), Utilities (XLU)."));
    }

    #[test]
    fn sector_section_is_omitted_without_notes() {
        let mut report = sample_report();
        report.sector_notes.clear();
        assert!(!report.render().contains("📊 SECTOR ANALYSIS:"));
    }

    #[test]
    fn digest_lists_results_in_insertion_order() {
        let mut results = ResultSet::new();
        results.insert(
            "M2SL",
            Observation::Scalar(ScalarObservation {
                indicator: "M2 Money Supply ($ Billions)".into(),
                value: "21533.8".into(),
                date: "2025-06-30".into(),
            }),
        );
        results.insert("Metals", Observation::failure("upstream down"));
        results.insert(
            "Market Sentiment",
            Observation::Sentiment(SentimentObservation {
                indicator: "Market Risk Sentiment".into(),
                vix: Some(17.4),
                sp500_volume: None,
                risk_ratio: None,
                hyg_price: None,
            }),
        );

        let text = digest(&results);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Analysis based on fetched data:");
        assert_eq!(
            lines[1],
            "- M2 Money Supply ($ Billions): 21533.8 (as of 2025-06-30)"
        );
        assert_eq!(lines[2], "- Metals: ERROR - upstream down");
        assert_eq!(lines[3], "- Market Sentiment: VIX=17.4, Volume=n/a");
    }
}

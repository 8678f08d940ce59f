//! Health Score Rules
//!
//! The composite health score starts at zero and is adjusted by a fixed set
//! of weighted threshold rules. Rules only ever add into the same
//! accumulator, so their evaluation order does not change the total.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::Snapshot;
use crate::observation::InstrumentQuote;

/// Score contribution of every market dimension except margin debt.
///
/// The margin-debt bonus is applied later, alongside its insight line; the
/// allocation base rules deliberately see the score without it.
pub(crate) fn market_score(
    snap: &Snapshot,
    metals: Option<&BTreeMap<String, InstrumentQuote>>,
) -> i32 {
    let mut score = 0;

    // Core economy
    if let Some(debt) = &snap.debt_to_gdp {
        if debt.value > 120.0 {
            score -= 2;
        } else if debt.value > 100.0 {
            score -= 1;
        }
    }

    if let Some(indpro) = &snap.indpro {
        if indpro.value > 103.0 {
            score += 1;
        } else if indpro.value < 100.0 {
            score -= 1;
        }
    }

    // Liquidity
    if let Some(rrp) = &snap.reverse_repo {
        if rrp.value > 2000.0 {
            score -= 1;
        }
    }

    // Risk
    if let Some(vix) = snap.vix {
        if vix > 30.0 {
            score -= 2;
        } else if vix > 20.0 {
            score -= 1;
        } else {
            score += 1;
        }
    }

    // Credit
    if let Some(ratio) = snap.risk_ratio {
        if ratio > 1.0 {
            score += 1;
        }
    }

    // Metals fear check: one deduction no matter how many metals spike
    if let Some(metals) = metals {
        if metals.values().any(|q| q.change_5d_pct > 3.0) {
            score -= 1;
        }
    }

    score
}

/// Categorical bucket for the health score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Neutral,
    Healthy,
    Caution,
    Danger,
}

impl Verdict {
    /// Bucket a score. Later assignments override earlier ones: a score
    /// below -3 is both a caution and a danger, and danger wins.
    pub fn from_score(score: i32) -> Self {
        let mut verdict = Self::Neutral;
        if score > 2 {
            verdict = Self::Healthy;
        }
        if score < 0 {
            verdict = Self::Caution;
        }
        if score < -3 {
            verdict = Self::Danger;
        }
        verdict
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral => f.write_str("NEUTRAL"),
            Self::Healthy => f.write_str("HEALTHY (Risk-On)"),
            Self::Caution => f.write_str("CAUTION (Hedge)"),
            Self::Danger => f.write_str("DANGER (Risk-Off)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_buckets() {
        assert_eq!(Verdict::from_score(-5), Verdict::Danger);
        assert_eq!(Verdict::from_score(-4), Verdict::Danger);
        assert_eq!(Verdict::from_score(-1), Verdict::Caution);
        assert_eq!(Verdict::from_score(0), Verdict::Neutral);
        assert_eq!(Verdict::from_score(2), Verdict::Neutral);
        assert_eq!(Verdict::from_score(3), Verdict::Healthy);
    }

    #[test]
    fn verdict_labels() {
        assert_eq!(Verdict::from_score(3).to_string(), "HEALTHY (Risk-On)");
        assert_eq!(Verdict::from_score(-1).to_string(), "CAUTION (Hedge)");
        assert_eq!(Verdict::from_score(-5).to_string(), "DANGER (Risk-Off)");
        assert_eq!(Verdict::from_score(0).to_string(), "NEUTRAL");
    }
}

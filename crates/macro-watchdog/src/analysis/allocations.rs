//! Allocation Rules
//!
//! The recommendation list is built by a prioritized rule sequence. Most
//! rules append; the deep-negative rule *replaces* everything accumulated so
//! far, and that override is an explicit branch here rather than an in-place
//! mutation buried in the scoring pass.

use std::fmt;

use serde::Serialize;

use super::insights::{GlobalPulse, SectorMomentum};

/// A recommended positioning move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    InflationHedge,
    GrowthMomentum,
    Cyclicals,
    Defensive,
    CashIsKing,
    HousingRecovery,
    CryptoMomentum,
    GlobalValue,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InflationHedge => f.write_str("🛡️ INFLATION HEDGE: Buy Gold (GLD), Energy (XLE)."),
            Self::GrowthMomentum => f.write_str("🚀 GROWTH MOMENTUM: Tech (XLK), AI (NVDA)."),
            Self::Cyclicals => f.write_str("🏭 CYCLICALS: Industrials (XLI)."),
            Self::Defensive => {
                f.write_str("🛡️ DEFENSIVE: Overweight Healthcare (XLV), Utilities (XLU).")
            }
            Self::CashIsKing => f.write_str("🚨 CASH IS KING: Sell Equities, Buy T-Bills (BIL)"),
            Self::HousingRecovery => {
                f.write_str("🏠 HOUSING RECOVERY: Buy Homebuilders (ITB) if rates stabilize.")
            }
            Self::CryptoMomentum => f.write_str("⚡ CRYPTO MOMENTUM: Bitcoin (IBIT) breakout."),
            Self::GlobalValue => f.write_str("🌍 GLOBAL VALUE: Buy Europe (EZU) or Japan (EWJ)."),
        }
    }
}

/// Base allocation pass, evaluated against the market score (margin-debt
/// bonus not yet applied).
pub(crate) fn base_allocations(
    market_score: i32,
    inflation_risk: bool,
    momentum: &SectorMomentum,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if inflation_risk || momentum.energy > 5.0 {
        recs.push(Recommendation::InflationHedge);
    }

    if market_score > 0 {
        if momentum.tech > momentum.utilities {
            recs.push(Recommendation::GrowthMomentum);
        }
        if momentum.industrials > 0.0 {
            recs.push(Recommendation::Cyclicals);
        }
    } else {
        recs.push(Recommendation::Defensive);
    }

    // Terminal override: a deeply negative score wipes everything above.
    if market_score < -3 {
        recs = vec![Recommendation::CashIsKing];
    }

    // Housing recovery appends even after the wipe.
    if market_score > 1 {
        recs.push(Recommendation::HousingRecovery);
    }

    recs
}

/// Margin-debt-gated modulations, evaluated against the final score and the
/// global/crypto pulse. Without that pulse (crypto or global bundle absent)
/// both rules are no-ops, even when margin debt itself is present.
pub(crate) fn margin_modulations(
    recs: &mut Vec<Recommendation>,
    pulse: Option<&GlobalPulse>,
    final_score: i32,
) {
    let Some(pulse) = pulse else {
        return;
    };

    if pulse.btc_change > 5.0 && final_score > 0 {
        recs.push(Recommendation::CryptoMomentum);
    }
    if pulse.ezu_change > pulse.spy_change {
        recs.push(Recommendation::GlobalValue);
    }
}

//! Trust-ratio scoring.
//!
//! A claim's trust ratio is the share of stake behind it:
//! `support / (support + counter)`. It is only defined when a counter vault
//! exists and the two totals are not both zero.
//!
//! Bands:
//!
//! | ratio        | band            |
//! |--------------|-----------------|
//! | undefined    | unverified      |
//! | > 0.8        | strong positive |
//! | 0.5 ..= 0.8  | mixed           |
//! | < 0.5        | negative        |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Shares;

/// Ratios strictly above this are strong positive.
pub const STRONG_POSITIVE_ABOVE: f64 = 0.8;
/// Ratios at or above this (and not strong positive) are mixed.
pub const MIXED_FROM: f64 = 0.5;

/// `support / (support + counter)`, or `None` when undefined.
pub fn trust_ratio(support: Shares, counter: Option<Shares>) -> Option<f64> {
    let counter = counter?;
    let total = support.as_f64() + counter.as_f64();
    if total <= 0.0 {
        return None;
    }
    Some((support.as_f64() / total).clamp(0.0, 1.0))
}

/// Round to four decimal places.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    Unverified,
    StrongPositive,
    Mixed,
    Negative,
}

impl TrustBand {
    pub fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            None => TrustBand::Unverified,
            Some(r) if r.is_nan() => TrustBand::Unverified,
            Some(r) if r > STRONG_POSITIVE_ABOVE => TrustBand::StrongPositive,
            Some(r) if r >= MIXED_FROM => TrustBand::Mixed,
            Some(_) => TrustBand::Negative,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrustBand::Unverified => "unverified / no data",
            TrustBand::StrongPositive => "strong positive",
            TrustBand::Mixed => "mixed / contested",
            TrustBand::Negative => "negative",
        }
    }
}

impl fmt::Display for TrustBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ratio together with the band it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustAssessment {
    pub ratio: Option<f64>,
    pub band: TrustBand,
}

impl TrustAssessment {
    pub fn compute(support: Shares, counter: Option<Shares>) -> Self {
        Self::from_ratio(trust_ratio(support, counter))
    }

    pub fn from_ratio(ratio: Option<f64>) -> Self {
        Self {
            ratio,
            band: TrustBand::from_ratio(ratio),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.ratio.is_some()
    }
}

impl fmt::Display for TrustAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ratio {
            Some(r) => write!(f, "{:.2}% ({})", r * 100.0, self.band),
            None => write!(f, "{}", self.band),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_counter_stake_is_full_trust() {
        assert_eq!(trust_ratio(Shares(500), Some(Shares::ZERO)), Some(1.0));
    }

    #[test]
    fn test_both_zero_is_unverified() {
        let a = TrustAssessment::compute(Shares::ZERO, Some(Shares::ZERO));
        assert_eq!(a.ratio, None);
        assert_eq!(a.band, TrustBand::Unverified);
        assert_eq!(a.to_string(), "unverified / no data");
    }

    #[test]
    fn test_missing_counter_vault_is_unverified() {
        assert_eq!(trust_ratio(Shares::from_eth(10), None), None);
        assert_eq!(
            TrustAssessment::compute(Shares::from_eth(10), None).band,
            TrustBand::Unverified
        );
    }

    #[test]
    fn test_bands() {
        assert_eq!(TrustBand::from_ratio(Some(0.85)), TrustBand::StrongPositive);
        assert_eq!(TrustBand::from_ratio(Some(0.6)), TrustBand::Mixed);
        assert_eq!(TrustBand::from_ratio(Some(0.2)), TrustBand::Negative);
        assert_eq!(TrustBand::from_ratio(None), TrustBand::Unverified);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TrustBand::from_ratio(Some(0.8)), TrustBand::Mixed);
        assert_eq!(TrustBand::from_ratio(Some(0.5)), TrustBand::Mixed);
        assert_eq!(TrustBand::from_ratio(Some(0.4999)), TrustBand::Negative);
        assert_eq!(TrustBand::from_ratio(Some(1.0)), TrustBand::StrongPositive);
        assert_eq!(TrustBand::from_ratio(Some(0.0)), TrustBand::Negative);
    }

    #[test]
    fn test_display() {
        let a = TrustAssessment::compute(Shares(85), Some(Shares(15)));
        assert_eq!(a.to_string(), "85.00% (strong positive)");
    }

    #[test]
    fn test_band_serializes_snake_case() {
        let json = serde_json::to_string(&TrustBand::StrongPositive).unwrap();
        assert_eq!(json, "\"strong_positive\"");
    }

    #[test]
    fn test_round_ratio() {
        assert_eq!(round_ratio(2.0 / 3.0), 0.6667);
        assert_eq!(round_ratio(1.0), 1.0);
    }

    proptest! {
        #[test]
        fn ratio_within_unit_interval(support in any::<u128>(), counter in any::<u128>()) {
            let ratio = trust_ratio(Shares(support), Some(Shares(counter)));
            if support == 0 && counter == 0 {
                prop_assert!(ratio.is_none());
            } else {
                let r = ratio.unwrap();
                prop_assert!((0.0..=1.0).contains(&r));
            }
        }

        #[test]
        fn uncontested_stake_is_one(support in 1u128..=u128::MAX) {
            prop_assert_eq!(trust_ratio(Shares(support), Some(Shares::ZERO)), Some(1.0));
        }

        #[test]
        fn band_never_panics_on_defined_ratio(support in any::<u64>(), counter in any::<u64>()) {
            let a = TrustAssessment::compute(Shares(support.into()), Some(Shares(counter.into())));
            prop_assert_eq!(a.is_defined(), support > 0 || counter > 0);
        }
    }
}

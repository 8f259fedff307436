use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Decimal places kept when rendering an ETH-equivalent amount.
const ETH_DISPLAY_DECIMALS: usize = 4;

/// A wei-denominated share amount as reported by a vault or position.
///
/// The remote service sends these as decimal strings (they overflow `u64`),
/// but plain JSON numbers are accepted as well. Serializes back as a decimal
/// string so no precision is lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shares(pub u128);

impl Shares {
    pub const ZERO: Shares = Shares(0);

    pub fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub fn from_eth(eth: u64) -> Self {
        Self(u128::from(eth) * WEI_PER_ETH)
    }

    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// ETH-equivalent amount (wei / 10^18), truncated to four decimals with
    /// trailing zeros trimmed: `5420 * 10^18` wei renders as `5420`.
    /// Non-zero amounts below the smallest shown unit render as `<0.0001`.
    pub fn to_eth_string(&self) -> String {
        let whole = self.0 / WEI_PER_ETH;
        let scale = 10u128.pow(18 - ETH_DISPLAY_DECIMALS as u32);
        let frac = (self.0 % WEI_PER_ETH) / scale;
        if frac == 0 {
            if whole == 0 && self.0 != 0 {
                return format!("<0.{:0>width$}", 1, width = ETH_DISPLAY_DECIMALS);
            }
            return whole.to_string();
        }
        let digits = format!("{frac:0width$}", width = ETH_DISPLAY_DECIMALS);
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Add for Shares {
    type Output = Shares;

    fn add(self, rhs: Shares) -> Shares {
        Shares(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Shares {
    fn sum<I: Iterator<Item = Shares>>(iter: I) -> Shares {
        iter.fold(Shares::ZERO, |acc, s| acc + s)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Shares {
    type Err = CoreError;

    /// Parses a non-negative decimal string. Fractional digits are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(CoreError::InvalidShares(s.to_string()));
        }

        if int_part.is_empty() {
            return Ok(Shares::ZERO);
        }
        int_part
            .parse::<u128>()
            .map(Shares)
            .map_err(|_| CoreError::InvalidShares(s.to_string()))
    }
}

impl Serialize for Shares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Shares {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SharesVisitor)
    }
}

struct SharesVisitor;

impl<'de> Visitor<'de> for SharesVisitor {
    type Value = Shares;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative share amount as a number or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Shares, E> {
        Ok(Shares(u128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Shares, E> {
        Ok(Shares(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Shares, E> {
        u128::try_from(v)
            .map(Shares)
            .map_err(|_| E::custom(format!("negative share amount: {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Shares, E> {
        if v.is_finite() && v >= 0.0 {
            Ok(Shares(v as u128))
        } else {
            Err(E::custom(format!("invalid share amount: {v}")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Shares, E> {
        v.parse().map_err(E::custom)
    }
}

/// An identifier the remote service types as `numeric`; it may arrive as a
/// JSON number or a string and is kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NumericId(pub String);

impl NumericId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for NumericId {
    fn from(v: u64) -> Self {
        Self(v.to_string())
    }
}

impl<'de> Deserialize<'de> for NumericId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = NumericId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a numeric id as a number or string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NumericId, E> {
                Ok(NumericId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NumericId, E> {
                Ok(NumericId(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<NumericId, E> {
                Ok(NumericId(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NumericId, E> {
                Ok(NumericId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

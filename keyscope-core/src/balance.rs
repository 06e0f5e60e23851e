use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DelegationError;

/// A token amount in yoctoNEAR (1 NEAR = 10^24 yocto).
///
/// Chain RPC interfaces exchange balances as decimal strings because they
/// exceed what JSON numbers can carry losslessly, so this wrapper serializes
/// as a string while exposing `u128` arithmetic in Rust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct YoctoNear(u128);

impl YoctoNear {
    /// Wraps a raw yocto amount.
    #[must_use]
    pub const fn from_yocto(amount: u128) -> Self {
        Self(amount)
    }

    /// Returns the raw yocto amount.
    #[must_use]
    pub const fn as_yocto(self) -> u128 {
        self.0
    }

    /// Whether the amount is exactly zero. A zero remaining allowance means
    /// the scoped key can no longer pay for gas.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses a decimal string as produced by chain RPC responses.
    ///
    /// # Errors
    /// Returns [`DelegationError::InvalidAmount`] if the input is not a
    /// decimal integer that fits in 128 bits.
    pub fn parse(input: &str) -> Result<Self, DelegationError> {
        input
            .trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| DelegationError::InvalidAmount {
                value: input.to_string(),
            })
    }
}

impl fmt::Display for YoctoNear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for YoctoNear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YoctoNear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A gas budget, in raw gas units (10^12 = 1 Tgas).
///
/// Serialized as a decimal string for the same reason as [`YoctoNear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NearGas(u64);

impl NearGas {
    /// Wraps a raw gas amount.
    #[must_use]
    pub const fn from_gas(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the raw gas amount.
    #[must_use]
    pub const fn as_gas(self) -> u64 {
        self.0
    }

    /// Parses a decimal string gas amount.
    ///
    /// # Errors
    /// Returns [`DelegationError::InvalidAmount`] if the input is not a
    /// decimal integer that fits in 64 bits.
    pub fn parse(input: &str) -> Result<Self, DelegationError> {
        input
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DelegationError::InvalidAmount {
                value: input.to_string(),
            })
    }
}

impl fmt::Display for NearGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NearGas {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NearGas {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{DEFAULT_FUNCTION_CALL_GAS, DEFAULT_KEY_ALLOWANCE};

    #[test]
    fn test_yocto_string_round_trip() {
        let amount = YoctoNear::from_yocto(250_000_000_000_000_000_000_000);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"250000000000000000000000\"");

        let back: YoctoNear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn test_yocto_parse_rejects_garbage() {
        assert!(YoctoNear::parse("").is_err());
        assert!(YoctoNear::parse("-5").is_err());
        assert!(YoctoNear::parse("0x10").is_err());
        assert!(YoctoNear::parse("1.5").is_err());
    }

    #[test]
    fn test_zero_detection() {
        assert!(YoctoNear::from_yocto(0).is_zero());
        assert!(!YoctoNear::from_yocto(1).is_zero());
        assert!(YoctoNear::parse("0").unwrap().is_zero());
    }

    #[test]
    fn test_gas_string_round_trip() {
        let gas = NearGas::from_gas(30_000_000_000_000);
        let json = serde_json::to_string(&gas).unwrap();
        assert_eq!(json, "\"30000000000000\"");

        let back: NearGas = serde_json::from_str(&json).unwrap();
        assert_eq!(back, gas);
    }

    #[test]
    fn test_default_constants_match_legacy_literals() {
        // Values inherited from the original front-end; they must not drift.
        assert_eq!(
            DEFAULT_KEY_ALLOWANCE.to_string(),
            "250000000000000000000000"
        );
        assert_eq!(DEFAULT_FUNCTION_CALL_GAS.to_string(), "30000000000000");
    }
}

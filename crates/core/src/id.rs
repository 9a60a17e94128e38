//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a registered customer.
///
/// Assigned by the registry from a monotonically increasing sequence starting
/// at 1. Serialized as a bare integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u64);

impl CustomerId {
    /// The first identifier a fresh registry hands out.
    pub const FIRST: CustomerId = CustomerId(1);

    /// Wrap a raw value. Zero is not a valid customer identifier.
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid_id("CustomerId: must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one in the registry's sequence.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<CustomerId> for u64 {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for CustomerId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for CustomerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("CustomerId: {e}")))?;
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        let id: CustomerId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!("0".parse::<CustomerId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("abc".parse::<CustomerId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("-3".parse::<CustomerId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn sequence_starts_at_one_and_increments() {
        assert_eq!(CustomerId::FIRST.get(), 1);
        assert_eq!(CustomerId::FIRST.next().get(), 2);
        assert!(CustomerId::FIRST < CustomerId::FIRST.next());
    }

    #[test]
    fn serializes_as_a_bare_integer() {
        let id = CustomerId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}

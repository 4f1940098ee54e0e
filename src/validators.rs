//! SIREN and SIRET identifier validation.
//!
//! Both identifiers are fixed-length digit strings; spaces, hyphens and
//! periods are accepted as separators and stripped before checking.

use std::fmt;
use std::str::FromStr;

use crate::error::InpiError;

/// A validated 9-digit SIREN company identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Siren(String);

/// A validated 14-digit SIRET establishment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Siret(String);

fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect()
}

impl Siren {
    /// Validate and normalize a SIREN.
    pub fn parse(input: &str) -> Result<Self, InpiError> {
        let digits = normalize(input);
        if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InpiError::InvalidSiren(input.to_string()));
        }
        Ok(Siren(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Siret {
    /// Validate and normalize a SIRET.
    pub fn parse(input: &str) -> Result<Self, InpiError> {
        let digits = normalize(input);
        if digits.len() != 14 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InpiError::InvalidSiret(input.to_string()));
        }
        Ok(Siret(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The SIREN is the first 9 digits of a SIRET.
    pub fn siren(&self) -> Siren {
        Siren(self.0[..9].to_string())
    }
}

impl fmt::Display for Siren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Siret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Siren {
    type Err = InpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Siren::parse(s)
    }
}

impl FromStr for Siret {
    type Err = InpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Siret::parse(s)
    }
}

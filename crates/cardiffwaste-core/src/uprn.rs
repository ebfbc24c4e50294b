//! Unique Property Reference Number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

/// Identifier for a property in the council's address database.
///
/// Accepted as an integer or a numeric string; always stored and sent to the
/// upstream API as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Uprn(u64);

impl Uprn {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Uprn {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for Uprn {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl FromStr for Uprn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ConfigError::InvalidUprn {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TryFrom<&str> for Uprn {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Uprn {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<i64> for Uprn {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|e| ConfigError::InvalidUprn {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Uprn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The address search endpoint has been seen returning UPRNs both as JSON
/// numbers and as strings.
impl<'de> Deserialize<'de> for Uprn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(u64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Ok(Self(n)),
            Wire::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

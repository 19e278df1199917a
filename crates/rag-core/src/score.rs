//! Answer score.
//!
//! The backend stores scores as the enumeration `"0"` through `"5"`. On the
//! client a score is a small integer; it is written as a JSON number and read
//! back from either a number or a numeric string.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// A validated answer score in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Lowest accepted score.
    pub const MIN: u8 = 0;
    /// Highest accepted score.
    pub const MAX: u8 = 5;

    /// Build a score, rejecting values outside `0..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `value` is out of range.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX {
            return Err(CoreError::Validation(format!(
                "score {value} is out of range ({}..={})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    /// The raw score value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for Score {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| CoreError::Validation(format!("score '{s}' is not a number")))?;
        Self::new(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawScore::deserialize(deserializer)? {
            RawScore::Number(n) => u8::try_from(n)
                .map_err(|_| serde::de::Error::custom(format!("score {n} is out of range")))
                .and_then(|v| Self::new(v).map_err(serde::de::Error::custom)),
            RawScore::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl JsonSchema for Score {
    fn schema_name() -> Cow<'static, str> {
        "Score".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "minimum": Self::MIN,
            "maximum": Self::MAX,
        })
    }
}

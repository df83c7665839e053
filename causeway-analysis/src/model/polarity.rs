//! Edge signs, node polarities, and the signed node identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sign of a raw influence edge: activating (+1) or inhibiting (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Numeric value, +1 or -1.
    pub fn value(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// Sign of the product of two signs.
    pub fn compose(self, other: Sign) -> Sign {
        if self == other {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> i8 {
        sign.value()
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(format!("edge sign must be 1 or -1, got {other}")),
        }
    }
}

/// Causal sense of a node: positive (0, activated) or negative (1, inhibited).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub const BOTH: [Polarity; 2] = [Self::Positive, Self::Negative];

    /// The 0/1 encoding used in path listings.
    pub fn bit(self) -> u8 {
        match self {
            Self::Positive => 0,
            Self::Negative => 1,
        }
    }

    /// +1 for positive, -1 for negative.
    pub fn sign_value(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// Polarity reached by following an edge of `sign` from this polarity.
    pub fn through(self, sign: Sign) -> Polarity {
        match sign {
            Sign::Positive => self,
            Sign::Negative => self.flip(),
        }
    }

    pub fn flip(self) -> Polarity {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Self::Positive
    }
}

impl From<Polarity> for u8 {
    fn from(polarity: Polarity) -> u8 {
        polarity.bit()
    }
}

impl TryFrom<u8> for Polarity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Positive),
            1 => Ok(Self::Negative),
            other => Err(format!("polarity must be 0 or 1, got {other}")),
        }
    }
}

/// A base node in one of its two causal senses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignedNode {
    pub base: String,
    pub polarity: Polarity,
}

impl SignedNode {
    pub fn new(base: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            base: base.into(),
            polarity,
        }
    }

    pub fn positive(base: impl Into<String>) -> Self {
        Self::new(base, Polarity::Positive)
    }

    pub fn negative(base: impl Into<String>) -> Self {
        Self::new(base, Polarity::Negative)
    }
}

impl fmt::Display for SignedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.polarity {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        };
        write!(f, "{}({})", self.base, mark)
    }
}

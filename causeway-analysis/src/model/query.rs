//! Causal claims checked against the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::polarity::Polarity;

/// Direction of the claimed effect on the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPolarity {
    Increase,
    Decrease,
}

impl QueryPolarity {
    /// Polarity the object node must be reached in.
    pub fn target_polarity(self) -> Polarity {
        match self {
            Self::Increase => Polarity::Positive,
            Self::Decrease => Polarity::Negative,
        }
    }
}

/// Kind of claim. The engine itself is kind-agnostic; adapters dispatch on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CausalQueryKind {
    Modification,
    RegulateActivity,
    RegulateAmount,
    Influence,
    /// Any statement kind the engine has no name for.
    Other(String),
}

impl CausalQueryKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Modification => "modification",
            Self::RegulateActivity => "regulate_activity",
            Self::RegulateAmount => "regulate_amount",
            Self::Influence => "influence",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for CausalQueryKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "modification" => Self::Modification,
            "regulate_activity" => Self::RegulateActivity,
            "regulate_amount" => Self::RegulateAmount,
            "influence" => Self::Influence,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for CausalQueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "`subject` affects `object` with `polarity`". Subject and object are opaque
/// entity references that only the adapter knows how to resolve. A missing
/// subject means "any upstream cause".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalQuery {
    pub subject: Option<String>,
    pub object: Option<String>,
    pub polarity: QueryPolarity,
    pub kind: CausalQueryKind,
}

impl CausalQuery {
    pub fn new(
        subject: Option<&str>,
        object: Option<&str>,
        polarity: QueryPolarity,
        kind: CausalQueryKind,
    ) -> Self {
        Self {
            subject: subject.map(str::to_string),
            object: object.map(str::to_string),
            polarity,
            kind,
        }
    }

    pub fn increases(subject: &str, object: &str) -> Self {
        Self::new(
            Some(subject),
            Some(object),
            QueryPolarity::Increase,
            CausalQueryKind::Influence,
        )
    }

    pub fn decreases(subject: &str, object: &str) -> Self {
        Self::new(
            Some(subject),
            Some(object),
            QueryPolarity::Decrease,
            CausalQueryKind::Influence,
        )
    }
}

impl fmt::Display for CausalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.polarity {
            QueryPolarity::Increase => "increases",
            QueryPolarity::Decrease => "decreases",
        };
        write!(
            f,
            "{}: {} {} {}",
            self.kind,
            self.subject.as_deref().unwrap_or("*"),
            verb,
            self.object.as_deref().unwrap_or("?")
        )
    }
}

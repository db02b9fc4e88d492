use serde::{Deserialize, Serialize};

/// A measured value, numeric or categorical.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Label(String),
}

impl MetricValue {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Label(s) => Some(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

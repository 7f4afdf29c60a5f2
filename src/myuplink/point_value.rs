use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Value of a device point. Whole numbers stay integers on the wire.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PointValue {
    /// A numeric value, sent as an integer when it has no fractional part.
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            PointValue::Integer(value as i64)
        } else {
            PointValue::Float(value)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PointValue::Integer(n) => Some(*n as f64),
            PointValue::Float(n) => Some(*n),
            PointValue::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PointValue::Integer(n) => Some(*n),
            PointValue::Float(n) if n.fract() == 0.0 => Some(*n as i64),
            PointValue::Float(_) => None,
            PointValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<i64> for PointValue {
    fn from(value: i64) -> Self {
        PointValue::Integer(value)
    }
}

impl From<u8> for PointValue {
    fn from(value: u8) -> Self {
        PointValue::Integer(value as i64)
    }
}


impl Display for PointValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointValue::Integer(n) => write!(f, "{}", n),
            PointValue::Float(n) => write!(f, "{}", n),
            PointValue::Text(text) => f.write_str(text),
        }
    }
}

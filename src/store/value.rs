//! Raw values held by a preference store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A raw value as persisted by [`SharedPreferences`](super::SharedPreferences).
///
/// These are the only types the store knows about. Doubles are not a raw
/// type; see [`crate::double`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Bool(bool),
    String(String),
    StringSet(BTreeSet<String>),
}

/// Type tag of a [`PrefValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Int,
    Long,
    Float,
    Bool,
    String,
    StringSet,
}

impl PrefValue {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            PrefValue::Int(_) => ValueKind::Int,
            PrefValue::Long(_) => ValueKind::Long,
            PrefValue::Float(_) => ValueKind::Float,
            PrefValue::Bool(_) => ValueKind::Bool,
            PrefValue::String(_) => ValueKind::String,
            PrefValue::StringSet(_) => ValueKind::StringSet,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PrefValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            PrefValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PrefValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            PrefValue::StringSet(v) => Some(v),
            _ => None,
        }
    }
}

impl PrefValue {
    /// JSON form of this value, tagged like the store file.
    ///
    /// JSON has no NaN or infinity, and `serde_json` would write them as
    /// `null`. Non-finite floats are written as the strings `"NaN"`, `"inf"`
    /// and `"-inf"` instead, so they never look like a missing value.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut json = serde_json::to_value(self)?;
        if let PrefValue::Float(v) = self {
            let label = non_finite_label(f64::from(*v));
            if let (Some(label), Some(object)) = (label, json.as_object_mut()) {
                object.insert("value".to_string(), label.into());
            }
        }
        Ok(json)
    }
}

/// String form of a non-finite float, or `None` for finite values.
pub(crate) fn non_finite_label(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Int(v) => write!(f, "{}", v),
            PrefValue::Long(v) => write!(f, "{}", v),
            PrefValue::Float(v) => write!(f, "{}", v),
            PrefValue::Bool(v) => write!(f, "{}", v),
            PrefValue::String(v) => write!(f, "{}", v),
            PrefValue::StringSet(values) => {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::StringSet => "string_set",
        };
        f.write_str(name)
    }
}

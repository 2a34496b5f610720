//! Setting values and data types
//!
//! A closed set of variants replaces runtime type juggling. `SettingType::coerce`
//! is used on writes and fails loudly when a value cannot be converted without
//! loss. `SettingType::normalize` is the read-side variant: it converts what it
//! can and passes anything else through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClResult, Error};

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	String(String),
	StringList(Vec<String>),
}

impl SettingValue {
	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::Int(_) => "int",
			SettingValue::Float(_) => "float",
			SettingValue::String(_) => "string",
			SettingValue::StringList(_) => "array",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			SettingValue::StringList(l) => Some(l),
			_ => None,
		}
	}

	/// Scalar string form, used for allowed-value lookups and text columns
	pub fn to_scalar_string(&self) -> Option<String> {
		match self {
			SettingValue::Bool(true) => Some("1".into()),
			SettingValue::Bool(false) => Some("0".into()),
			SettingValue::Int(i) => Some(i.to_string()),
			SettingValue::Float(f) => Some(f.to_string()),
			SettingValue::String(s) => Some(s.clone()),
			SettingValue::StringList(_) => None,
		}
	}

	/// Converts an incoming JSON payload value
	pub fn from_json(value: &serde_json::Value) -> ClResult<Self> {
		match value {
			serde_json::Value::Bool(b) => Ok(SettingValue::Bool(*b)),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Ok(SettingValue::Int(i))
				} else if let Some(f) = n.as_f64() {
					Ok(SettingValue::Float(f))
				} else {
					Err(Error::InvalidValue(format!("Number {} is out of range", n)))
				}
			}
			serde_json::Value::String(s) => Ok(SettingValue::String(s.clone())),
			serde_json::Value::Array(items) => {
				let mut list = Vec::with_capacity(items.len());
				for item in items {
					match SettingValue::from_json(item)?.to_scalar_string() {
						Some(s) => list.push(s),
						None => {
							return Err(Error::InvalidValue("Nested lists are not supported".into()));
						}
					}
				}
				Ok(SettingValue::StringList(list))
			}
			serde_json::Value::Null => Err(Error::InvalidValue("Value must not be null".into())),
			serde_json::Value::Object(_) => {
				Err(Error::InvalidValue("Objects are not supported as setting values".into()))
			}
		}
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SettingValue::StringList(l) => write!(f, "[{}]", l.join(", ")),
			v => write!(f, "{}", v.to_scalar_string().unwrap_or_default()),
		}
	}
}

impl From<bool> for SettingValue {
	fn from(b: bool) -> Self {
		SettingValue::Bool(b)
	}
}

impl From<i64> for SettingValue {
	fn from(i: i64) -> Self {
		SettingValue::Int(i)
	}
}

impl From<i32> for SettingValue {
	fn from(i: i32) -> Self {
		SettingValue::Int(i64::from(i))
	}
}

impl From<f64> for SettingValue {
	fn from(f: f64) -> Self {
		SettingValue::Float(f)
	}
}

impl From<&str> for SettingValue {
	fn from(s: &str) -> Self {
		SettingValue::String(s.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(s: String) -> Self {
		SettingValue::String(s)
	}
}

impl From<Vec<String>> for SettingValue {
	fn from(l: Vec<String>) -> Self {
		SettingValue::StringList(l)
	}
}

impl From<&[&str]> for SettingValue {
	fn from(l: &[&str]) -> Self {
		SettingValue::StringList(l.iter().map(|s| (*s).to_string()).collect())
	}
}

/// Declared data type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingType {
	#[serde(rename = "integer")]
	Int,
	#[serde(rename = "float")]
	Float,
	#[serde(rename = "string")]
	String,
	#[serde(rename = "boolean")]
	Bool,
	#[serde(rename = "array")]
	Array,
}

impl SettingType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SettingType::Int => "integer",
			SettingType::Float => "float",
			SettingType::String => "string",
			SettingType::Bool => "boolean",
			SettingType::Array => "array",
		}
	}

	/// Check if the value already has this type
	pub fn matches(&self, value: &SettingValue) -> bool {
		matches!(
			(self, value),
			(SettingType::Int, SettingValue::Int(_))
				| (SettingType::Float, SettingValue::Float(_))
				| (SettingType::String, SettingValue::String(_))
				| (SettingType::Bool, SettingValue::Bool(_))
				| (SettingType::Array, SettingValue::StringList(_))
		)
	}

	/// Converts a value to this type, failing when the conversion would lose information
	pub fn coerce(&self, value: SettingValue) -> ClResult<SettingValue> {
		let mismatch = |value: &SettingValue| {
			Error::InvalidValue(format!("Cannot convert {} '{}' to {}", value.type_name(), value, self.as_str()))
		};

		match (self, value) {
			(SettingType::Int, SettingValue::Int(i)) => Ok(SettingValue::Int(i)),
			(SettingType::Int, SettingValue::Bool(b)) => Ok(SettingValue::Int(i64::from(b))),
			(SettingType::Int, SettingValue::Float(f))
				if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 =>
			{
				Ok(SettingValue::Int(f as i64))
			}
			(SettingType::Int, SettingValue::String(s)) => match s.trim().parse::<i64>() {
				Ok(i) => Ok(SettingValue::Int(i)),
				Err(_) => Err(mismatch(&SettingValue::String(s))),
			},

			(SettingType::Float, SettingValue::Float(f)) => Ok(SettingValue::Float(f)),
			(SettingType::Float, SettingValue::Int(i)) => Ok(SettingValue::Float(i as f64)),
			(SettingType::Float, SettingValue::Bool(b)) => {
				Ok(SettingValue::Float(if b { 1.0 } else { 0.0 }))
			}
			(SettingType::Float, SettingValue::String(s)) => match s.trim().parse::<f64>() {
				Ok(f) if f.is_finite() => Ok(SettingValue::Float(f)),
				_ => Err(mismatch(&SettingValue::String(s))),
			},

			(SettingType::String, SettingValue::StringList(l)) => {
				Err(mismatch(&SettingValue::StringList(l)))
			}
			(SettingType::String, v) => {
				Ok(SettingValue::String(v.to_scalar_string().unwrap_or_default()))
			}

			(SettingType::Bool, SettingValue::Bool(b)) => Ok(SettingValue::Bool(b)),
			(SettingType::Bool, SettingValue::Int(0)) => Ok(SettingValue::Bool(false)),
			(SettingType::Bool, SettingValue::Int(1)) => Ok(SettingValue::Bool(true)),
			(SettingType::Bool, SettingValue::String(s)) => {
				match s.trim().to_ascii_lowercase().as_str() {
					"1" | "true" | "on" | "yes" => Ok(SettingValue::Bool(true)),
					"0" | "false" | "off" | "no" | "" => Ok(SettingValue::Bool(false)),
					_ => Err(mismatch(&SettingValue::String(s))),
				}
			}

			(SettingType::Array, SettingValue::StringList(l)) => Ok(SettingValue::StringList(l)),
			(SettingType::Array, SettingValue::String(s)) if s.is_empty() => {
				Ok(SettingValue::StringList(Vec::new()))
			}
			(SettingType::Array, v) => {
				Ok(SettingValue::StringList(v.to_scalar_string().into_iter().collect()))
			}

			(_, v) => Err(mismatch(&v)),
		}
	}

	/// Lenient read-side conversion of a persisted value
	pub fn normalize(&self, value: SettingValue) -> SettingValue {
		if self.matches(&value) {
			return value;
		}
		let fallback = value.clone();
		self.coerce(value).unwrap_or(fallback)
	}
}

impl fmt::Display for SettingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}


// vim: ts=4

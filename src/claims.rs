//! Claim names and claim values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Error, JsonValue, Result};

/// Registered claim names from [RFC 7519 section 4.1](https://datatracker.ietf.org/doc/html/rfc7519#section-4.1).
pub mod registered {
	/// Principal that issued the token.
	pub const ISSUER: &str = "iss";

	/// Principal that is the subject of the token.
	pub const SUBJECT: &str = "sub";

	/// Recipients the token is intended for.
	pub const AUDIENCE: &str = "aud";

	/// Expiration time, on or after which the token must not be accepted.
	pub const EXPIRES_AT: &str = "exp";

	/// Time before which the token must not be accepted.
	pub const NOT_BEFORE: &str = "nbf";

	/// Time at which the token was issued.
	pub const ISSUED_AT: &str = "iat";

	/// Unique identifier of the token.
	pub const TOKEN_ID: &str = "jti";

	/// All registered claim names.
	pub const ALL: [&str; 7] = [ISSUER, SUBJECT, AUDIENCE, EXPIRES_AT, NOT_BEFORE, ISSUED_AT, TOKEN_ID];
}

/// Header parameter names used by this crate.
pub mod header {
	pub const ALGORITHM: &str = "alg";
	pub const CONTENT_TYPE: &str = "cty";
	pub const TYPE: &str = "typ";
	pub const KEY_ID: &str = "kid";

	/// The fixed value of the `typ` header parameter.
	pub const JWT: &str = "JWT";
}

/// Check if a name is one of the registered claim names.
pub fn is_registered(name: &str) -> bool {
	registered::ALL.contains(&name)
}

/// Custom claims by name, in canonical (alphabetical) order.
pub type ClaimMap = BTreeMap<String, ClaimValue>;

/// The value of a custom claim.
///
/// Timestamps are encoded as integer seconds since the Unix epoch,
/// so after decoding they come back as [`ClaimValue::Integer`].
#[derive(Clone, Debug, PartialEq)]
pub enum ClaimValue {
	Null,
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Timestamp(DateTime<Utc>),
}

impl ClaimValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Integer(value) => Some(*value),
			Self::Timestamp(value) => Some(value.timestamp()),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Convert the claim to its JSON representation.
	pub fn to_json(&self) -> JsonValue {
		match self {
			Self::Null => JsonValue::Null,
			Self::Bool(value) => JsonValue::from(*value),
			Self::Integer(value) => JsonValue::from(*value),
			// Non-finite floats become null, the payload builder refuses them.
			Self::Float(value) => JsonValue::from(*value),
			Self::String(value) => JsonValue::from(value.as_str()),
			Self::Timestamp(value) => JsonValue::from(value.timestamp()),
		}
	}

	/// Convert a decoded JSON value to a claim value.
	///
	/// Arrays and objects are not claim values and are rejected,
	/// as are integers that do not fit in an `i64`.
	pub fn from_json(name: &str, value: JsonValue) -> Result<Self> {
		match value {
			JsonValue::Null => Ok(Self::Null),
			JsonValue::Bool(value) => Ok(Self::Bool(value)),
			JsonValue::String(value) => Ok(Self::String(value)),
			JsonValue::Number(number) => {
				if let Some(value) = number.as_i64() {
					Ok(Self::Integer(value))
				} else if number.is_f64() {
					number.as_f64()
						.map(Self::Float)
						.ok_or_else(|| Error::invalid_claim(format!("claim {:?} holds an unrepresentable number", name)))
				} else {
					Err(Error::invalid_claim(format!("claim {:?} holds an integer out of range: {}", name, number)))
				}
			},
			JsonValue::Array(_) => Err(Error::invalid_claim(format!("claim {:?} holds an array", name))),
			JsonValue::Object(_) => Err(Error::invalid_claim(format!("claim {:?} holds an object", name))),
		}
	}
}

impl From<&str> for ClaimValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for ClaimValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<bool> for ClaimValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for ClaimValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<i32> for ClaimValue {
	fn from(value: i32) -> Self {
		Self::Integer(value.into())
	}
}

impl From<u32> for ClaimValue {
	fn from(value: u32) -> Self {
		Self::Integer(value.into())
	}
}

impl From<f64> for ClaimValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<DateTime<Utc>> for ClaimValue {
	fn from(value: DateTime<Utc>) -> Self {
		Self::Timestamp(value)
	}
}

impl<T: Into<ClaimValue>> From<Option<T>> for ClaimValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;
	use chrono::TimeZone;
	use serde_json::json;

	#[test]
	fn test_is_registered() {
		for name in registered::ALL {
			assert!(is_registered(name));
		}
		assert!(!is_registered("role"));
		assert!(!is_registered("ISS"));
	}

	#[test]
	fn test_to_json() {
		let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
		assert!(ClaimValue::from("admin").to_json() == json!("admin"));
		assert!(ClaimValue::from(7i64).to_json() == json!(7));
		assert!(ClaimValue::from(true).to_json() == json!(true));
		assert!(ClaimValue::from(1.5).to_json() == json!(1.5));
		assert!(ClaimValue::from(None::<String>).to_json() == json!(null));
		assert!(ClaimValue::from(at).to_json() == json!(1704067200));
	}

	#[test]
	fn test_from_json() {
		assert!(let Ok(ClaimValue::Integer(1704067200)) = ClaimValue::from_json("at", json!(1704067200)));
		assert!(let Ok(ClaimValue::Float(_)) = ClaimValue::from_json("ratio", json!(0.25)));
		assert!(let Ok(ClaimValue::Null) = ClaimValue::from_json("gone", json!(null)));
		assert!(let Err(Error::InvalidClaim(_)) = ClaimValue::from_json("list", json!([1, 2])));
		assert!(let Err(Error::InvalidClaim(_)) = ClaimValue::from_json("map", json!({"a": 1})));
		assert!(let Err(Error::InvalidClaim(_)) = ClaimValue::from_json("huge", json!(u64::MAX)));
	}
}

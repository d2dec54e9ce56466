//! Building token payloads.
//!
//! A [`TokenPayload`] collects registered and custom claims through a fluent builder.
//! Calling [`TokenPayload::build`] finalises it into an immutable [`Claims`] value,
//! which is what actually gets encoded into a token.

use chrono::{DateTime, Utc};

use crate::claims::{is_registered, registered, ClaimMap, ClaimValue};
use crate::{Error, JsonObject, JsonValue, Result};

/// Builder for the claims of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenPayload {
	issuer     : Option<String>,
	subject    : Option<String>,
	audiences  : Vec<String>,
	expires_at : Option<i64>,
	not_before : Option<i64>,
	issued_at  : Option<i64>,
	token_id   : Option<String>,
	custom     : ClaimMap,
}

impl TokenPayload {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a single audience.
	pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
		self.audiences.push(audience.into());
		self
	}

	/// Add several audiences, keeping their order.
	pub fn with_audiences<I>(mut self, audiences: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.audiences.extend(audiences.into_iter().map(Into::into));
		self
	}

	pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = Some(subject.into());
		self
	}

	pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());
		self
	}

	pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
		self.token_id = Some(token_id.into());
		self
	}

	pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
		self.expires_at = Some(expires_at.timestamp());
		self
	}

	pub fn with_not_before(mut self, not_before: DateTime<Utc>) -> Self {
		self.not_before = Some(not_before.timestamp());
		self
	}

	pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
		self.issued_at = Some(issued_at.timestamp());
		self
	}

	/// Add a custom claim.
	///
	/// Registered claims have their own methods.
	/// Passing a registered claim name fails with [`Error::ReservedClaim`] and drops the builder.
	/// JSON has no NaN or infinity, so non-finite floats fail with [`Error::InvalidClaim`].
	pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Result<Self> {
		let name = name.into();
		if is_registered(&name) {
			return Err(Error::reserved_claim(name));
		}
		let value = value.into();
		if let ClaimValue::Float(float) = value {
			if !float.is_finite() {
				return Err(Error::invalid_claim(format!("claim {:?} holds a non-finite float: {}", name, float)));
			}
		}
		self.custom.insert(name, value);
		Ok(self)
	}

	/// Check if an issuer is set and not blank.
	pub fn has_issuer(&self) -> bool {
		not_blank(&self.issuer).is_some()
	}

	/// Finalise the payload into immutable claims.
	pub fn build(self) -> Claims {
		Claims {
			issuer     : self.issuer,
			subject    : self.subject,
			audiences  : self.audiences,
			expires_at : self.expires_at,
			not_before : self.not_before,
			issued_at  : self.issued_at,
			token_id   : self.token_id,
			custom     : self.custom,
		}
	}
}

/// The finalised, immutable claims of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Claims {
	issuer     : Option<String>,
	subject    : Option<String>,
	audiences  : Vec<String>,
	expires_at : Option<i64>,
	not_before : Option<i64>,
	issued_at  : Option<i64>,
	token_id   : Option<String>,
	custom     : ClaimMap,
}

impl Claims {
	pub fn issuer(&self) -> Option<&str> {
		not_blank(&self.issuer)
	}

	pub fn subject(&self) -> Option<&str> {
		not_blank(&self.subject)
	}

	pub fn audiences(&self) -> &[String] {
		&self.audiences
	}

	/// Expiration time in seconds since the Unix epoch.
	pub fn expires_at(&self) -> Option<i64> {
		self.expires_at
	}

	/// Not-before time in seconds since the Unix epoch.
	pub fn not_before(&self) -> Option<i64> {
		self.not_before
	}

	/// Issue time in seconds since the Unix epoch.
	pub fn issued_at(&self) -> Option<i64> {
		self.issued_at
	}

	pub fn token_id(&self) -> Option<&str> {
		not_blank(&self.token_id)
	}

	/// The custom claims, without any registered claim.
	pub fn custom(&self) -> &ClaimMap {
		&self.custom
	}

	pub fn into_custom(self) -> ClaimMap {
		self.custom
	}

	/// Get a copy with the issuer replaced if none is set.
	pub(crate) fn with_default_issuer(mut self, issuer: &str) -> Self {
		if self.issuer().is_none() {
			self.issuer = Some(issuer.to_string());
		}
		self
	}

	/// Convert the claims to the JSON object that forms the token payload.
	///
	/// Registered string claims are left out when unset or blank,
	/// the audience is left out when empty and timestamps are left out when unset.
	pub fn to_json_object(&self) -> JsonObject {
		let mut object: JsonObject = self.custom.iter()
			.map(|(name, value)| (name.clone(), value.to_json()))
			.collect();

		if let Some(issuer) = self.issuer() {
			object.insert(registered::ISSUER.to_string(), JsonValue::from(issuer));
		}
		if let Some(subject) = self.subject() {
			object.insert(registered::SUBJECT.to_string(), JsonValue::from(subject));
		}
		if !self.audiences.is_empty() {
			object.insert(registered::AUDIENCE.to_string(), JsonValue::from(self.audiences.clone()));
		}
		if let Some(expires_at) = self.expires_at {
			object.insert(registered::EXPIRES_AT.to_string(), JsonValue::from(expires_at));
		}
		if let Some(not_before) = self.not_before {
			object.insert(registered::NOT_BEFORE.to_string(), JsonValue::from(not_before));
		}
		if let Some(issued_at) = self.issued_at {
			object.insert(registered::ISSUED_AT.to_string(), JsonValue::from(issued_at));
		}
		if let Some(token_id) = self.token_id() {
			object.insert(registered::TOKEN_ID.to_string(), JsonValue::from(token_id));
		}

		object
	}

	/// Parse claims from a decoded token payload.
	///
	/// Registered claims must have their registered type.
	/// The audience may be a single string or an array of strings.
	pub fn from_json_object(object: JsonObject) -> Result<Self> {
		let mut claims = Self::default();

		for (name, value) in object {
			match name.as_str() {
				registered::ISSUER     => claims.issuer     = Some(parse_string(&name, value)?),
				registered::SUBJECT    => claims.subject    = Some(parse_string(&name, value)?),
				registered::TOKEN_ID   => claims.token_id   = Some(parse_string(&name, value)?),
				registered::AUDIENCE   => claims.audiences  = parse_audiences(value)?,
				registered::EXPIRES_AT => claims.expires_at = Some(parse_timestamp(&name, value)?),
				registered::NOT_BEFORE => claims.not_before = Some(parse_timestamp(&name, value)?),
				registered::ISSUED_AT  => claims.issued_at  = Some(parse_timestamp(&name, value)?),
				_ => {
					let value = ClaimValue::from_json(&name, value)?;
					claims.custom.insert(name, value);
				},
			}
		}

		Ok(claims)
	}
}

fn not_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.trim().is_empty())
}

fn parse_string(name: &str, value: JsonValue) -> Result<String> {
	match value {
		JsonValue::String(value) => Ok(value),
		other => Err(Error::invalid_claim(format!("registered claim {:?} must be a string, got {}", name, other))),
	}
}

fn parse_timestamp(name: &str, value: JsonValue) -> Result<i64> {
	value.as_i64()
		.ok_or_else(|| Error::invalid_claim(format!("registered claim {:?} must be an integer timestamp, got {}", name, value)))
}

fn parse_audiences(value: JsonValue) -> Result<Vec<String>> {
	match value {
		JsonValue::String(audience) => Ok(vec![audience]),
		JsonValue::Array(items) => items.into_iter()
			.map(|item| parse_string(registered::AUDIENCE, item))
			.collect(),
		other => Err(Error::invalid_claim(format!("registered claim \"aud\" must be a string or an array of strings, got {}", other))),
	}
}

//! Creating signed tokens.

use crate::claims::header;
use crate::codec::{CanonicalEncoder, JsonCodec, SerdeJsonCodec};
use crate::compact::encode_sign;
use crate::hmac::HmacEngine;
use crate::payload::{Claims, TokenPayload};
use crate::{Algorithm, JsonObject, JsonValue, Result};

/// Creates signed tokens from payloads.
pub trait TokenCreator {
	/// Sign a payload, producing a `header.payload.signature` token.
	fn sign(&self, payload: &TokenPayload) -> Result<String>;
}

/// [`TokenCreator`] signing with an HMAC algorithm.
///
/// Signing is a pure function of the payload and the creator settings:
/// the same payload always yields the same token.
#[derive(Clone, Debug)]
pub struct HmacTokenCreator<C = SerdeJsonCodec> {
	engine       : HmacEngine,
	issuer       : String,
	key_id       : Option<String>,
	content_type : Option<String>,
	encoder      : CanonicalEncoder<C>,
}

impl HmacTokenCreator {
	/// Create a token creator using `serde_json` for encoding.
	///
	/// The issuer is added to every payload that has no issuer of its own.
	pub fn new(algorithm: Algorithm, issuer: impl Into<String>, secret: impl AsRef<[u8]>) -> Result<Self> {
		Self::with_codec(algorithm, issuer, secret, SerdeJsonCodec)
	}
}

impl<C: JsonCodec> HmacTokenCreator<C> {
	/// Create a token creator with a custom JSON codec.
	pub fn with_codec(algorithm: Algorithm, issuer: impl Into<String>, secret: impl AsRef<[u8]>, codec: C) -> Result<Self> {
		Ok(Self::from_engine(HmacEngine::new(algorithm, secret)?, issuer, codec))
	}

	pub fn from_engine(engine: HmacEngine, issuer: impl Into<String>, codec: C) -> Self {
		Self {
			engine,
			issuer       : issuer.into(),
			key_id       : None,
			content_type : None,
			encoder      : CanonicalEncoder::new(codec),
		}
	}

	/// Set the `kid` header parameter of created tokens.
	pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
		self.key_id = Some(key_id.into());
		self
	}

	/// Set the `cty` header parameter of created tokens.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn algorithm(&self) -> Algorithm {
		self.engine.algorithm()
	}

	pub fn issuer(&self) -> &str {
		&self.issuer
	}

	/// Sign finalised claims.
	pub fn sign_claims(&self, claims: &Claims) -> Result<String> {
		let claims = claims.clone().with_default_issuer(&self.issuer);
		let token = encode_sign(self.header(), &claims.to_json_object(), &self.engine, &self.encoder)?;
		tracing::debug!(algorithm = %self.engine.algorithm(), "signed token");
		Ok(token)
	}

	fn header(&self) -> JsonObject {
		let mut header = JsonObject::new();
		header.insert(header::TYPE.to_string(), JsonValue::from(header::JWT));
		if let Some(key_id) = &self.key_id {
			header.insert(header::KEY_ID.to_string(), JsonValue::from(key_id.as_str()));
		}
		if let Some(content_type) = &self.content_type {
			header.insert(header::CONTENT_TYPE.to_string(), JsonValue::from(content_type.as_str()));
		}
		header
	}
}

impl<C: JsonCodec> TokenCreator for HmacTokenCreator<C> {
	fn sign(&self, payload: &TokenPayload) -> Result<String> {
		self.sign_claims(&payload.clone().build())
	}
}

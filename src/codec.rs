//! Canonical encoding of token segments.
//!
//! A segment is a JSON object serialized with its keys in alphabetical order,
//! then encoded as base64url without padding.
//! Since [`JsonObject`] is an ordered map, equal objects always encode to the same text,
//! which keeps signatures reproducible.

use std::collections::BTreeMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::{Error, JsonObject, JsonValue, Result};

/// Serialization of JSON objects to and from bytes.
///
/// Implementations must write object keys in the iteration order of the map they are given.
pub trait JsonCodec {
	fn serialize(&self, object: &JsonObject) -> Result<Vec<u8>>;

	fn deserialize(&self, data: &[u8]) -> Result<JsonObject>;
}

/// [`JsonCodec`] backed by `serde_json`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
	fn serialize(&self, object: &JsonObject) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(object)?)
	}

	fn deserialize(&self, data: &[u8]) -> Result<JsonObject> {
		Ok(serde_json::from_slice(data)?)
	}
}

impl<C: JsonCodec + ?Sized> JsonCodec for &C {
	fn serialize(&self, object: &JsonObject) -> Result<Vec<u8>> {
		(**self).serialize(object)
	}

	fn deserialize(&self, data: &[u8]) -> Result<JsonObject> {
		(**self).deserialize(data)
	}
}

/// Encode raw bytes as base64url without padding.
pub fn encode_base64(data: &[u8]) -> String {
	URL_SAFE_NO_PAD.encode(data)
}

/// Decode base64url without padding.
pub fn decode_base64(data: &[u8]) -> Result<Vec<u8>> {
	Ok(URL_SAFE_NO_PAD.decode(data)?)
}

/// Encoder and decoder for the JSON segments of a token.
#[derive(Clone, Debug, Default)]
pub struct CanonicalEncoder<C = SerdeJsonCodec> {
	codec: C,
}

impl<C: JsonCodec> CanonicalEncoder<C> {
	pub fn new(codec: C) -> Self {
		Self{codec}
	}

	pub fn codec(&self) -> &C {
		&self.codec
	}

	/// Serialize an object and encode it as base64url.
	pub fn encode(&self, object: &JsonObject) -> Result<String> {
		let json = self.codec.serialize(object)?;
		Ok(encode_base64(&json))
	}

	/// Decode a base64url segment and parse it as a JSON object.
	pub fn decode(&self, segment: &[u8]) -> Result<JsonObject> {
		let json = decode_base64(segment)?;
		self.codec.deserialize(&json)
	}

	/// Decode a segment whose values must all be strings, such as a token header.
	pub fn decode_strings(&self, segment: &[u8]) -> Result<BTreeMap<String, String>> {
		self.decode(segment)?
			.into_iter()
			.map(|(name, value)| match value {
				JsonValue::String(value) => Ok((name, value)),
				other => Err(Error::invalid_claim(format!("header parameter {:?} must be a string, got {}", name, other))),
			})
			.collect()
	}
}

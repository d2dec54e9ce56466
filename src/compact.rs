//! JWS Compact Serialization of tokens.
//!
//! Resolving a token goes through a few typed states:
//!   - a raw `&str`,
//!   - [`CompactSerializedParts`]: three non-empty, still encoded segments,
//!   - [`VerifiedToken`]: parts whose signature has been checked,
//!   - the decoded header and payload.
//!
//! A [`VerifiedToken`] can only be obtained through [`CompactSerializedParts::verify`],
//! so code that holds one never looks at unverified claims by accident.

use std::collections::BTreeMap;

use crate::claims::{is_registered, ClaimMap};
use crate::codec::{decode_base64, encode_base64, CanonicalEncoder, JsonCodec};
use crate::payload::Claims;
use crate::{Error, JsonObject, Result, Signer, Verifier};

/// The individual (still encoded) parts of a JWS Compact Serialized token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CompactSerializedParts<'a> {
	pub header    : &'a str,
	pub payload   : &'a str,
	pub signature : &'a str,
}

/// Split a token into its three encoded parts.
///
/// A compact token contains exactly three non-empty base64url encoded parts separated by period '.' characters:
///   - header
///   - payload
///   - signature
pub fn split_encoded_parts(token: &str) -> Result<CompactSerializedParts<'_>> {
	let mut parts = token.splitn(4, '.');

	let header    = parts.next().filter(|x| !x.is_empty()).ok_or_else(|| Error::malformed_token("token does not contain a header"))?;
	let payload   = parts.next().filter(|x| !x.is_empty()).ok_or_else(|| Error::malformed_token("token does not contain a payload"))?;
	let signature = parts.next().filter(|x| !x.is_empty()).ok_or_else(|| Error::malformed_token("token does not contain a signature"))?;

	// Make sure there are no additional parts in the input.
	if parts.next().is_some() {
		return Err(Error::malformed_token("token contains an additional part after the signature"));
	}

	Ok(CompactSerializedParts{header, payload, signature})
}

impl<'a> CompactSerializedParts<'a> {
	/// Check the signature and move on to the verified state.
	///
	/// The header is decoded first so the verifier can check the `alg` parameter.
	/// A header or signature that can not be decoded is a decode error,
	/// a signature that does not match is [`Error::InvalidSignature`].
	pub fn verify<C: JsonCodec>(self, verifier: &impl Verifier, encoder: &CanonicalEncoder<C>) -> Result<VerifiedToken<'a>> {
		let header    = encoder.decode(self.header.as_bytes())?;
		let signature = decode_base64(self.signature.as_bytes())?;
		verifier.verify(&header, self.header.as_bytes(), self.payload.as_bytes(), &signature)?;
		Ok(VerifiedToken{parts: self})
	}

	/// Decode the header without checking the signature.
	///
	/// Useful to inspect the header before choosing how to verify a token.
	/// Nothing read this way can be trusted.
	pub fn unverified_header<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<JsonObject> {
		encoder.decode(self.header.as_bytes())
	}
}

/// A token whose signature has been verified.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifiedToken<'a> {
	parts: CompactSerializedParts<'a>,
}

impl<'a> VerifiedToken<'a> {
	pub fn parts(&self) -> CompactSerializedParts<'a> {
		self.parts
	}

	pub fn header<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<JsonObject> {
		encoder.decode(self.parts.header.as_bytes())
	}

	/// Decode the header, requiring every parameter to be a string.
	pub fn header_strings<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<BTreeMap<String, String>> {
		encoder.decode_strings(self.parts.header.as_bytes())
	}

	/// Decode the full payload, registered claims included.
	pub fn payload<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<JsonObject> {
		encoder.decode(self.parts.payload.as_bytes())
	}

	/// Decode the payload into typed claims.
	pub fn claims<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<Claims> {
		Claims::from_json_object(self.payload(encoder)?)
	}

	/// Decode only the custom claims: every registered claim is removed.
	pub fn custom_claims<C: JsonCodec>(&self, encoder: &CanonicalEncoder<C>) -> Result<ClaimMap> {
		let mut payload = self.payload(encoder)?;
		payload.retain(|name, _| !is_registered(name));
		Ok(Claims::from_json_object(payload)?.into_custom())
	}
}

/// Encode and sign a header and payload into a compact token.
///
/// The signer adds its own header parameters before the header is encoded.
pub fn encode_sign<C: JsonCodec>(mut header: JsonObject, payload: &JsonObject, signer: &impl Signer, encoder: &CanonicalEncoder<C>) -> Result<String> {
	signer.set_header_params(&mut header);

	let encoded_header  = encoder.encode(&header)?;
	let encoded_payload = encoder.encode(payload)?;
	let signature       = signer.compute_mac(encoded_header.as_bytes(), encoded_payload.as_bytes())?;

	Ok(format!("{}.{}.{}", encoded_header, encoded_payload, encode_base64(&signature)))
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::claims::ClaimValue;
	use crate::hmac::HmacEngine;
	use crate::{json_object, Algorithm, JsonValue};
	use assert2::assert;

	fn encoder() -> CanonicalEncoder {
		CanonicalEncoder::default()
	}

	fn engine() -> HmacEngine {
		HmacEngine::new(Algorithm::HS256, [b'a'; 32]).unwrap()
	}

	#[test]
	fn test_split_encoded_parts() {
		let parts = split_encoded_parts("aaa.bbb.ccc").unwrap();
		assert!(parts.header == "aaa");
		assert!(parts.payload == "bbb");
		assert!(parts.signature == "ccc");
	}

	#[test]
	fn test_split_malformed() {
		for token in ["", "abc", "abc.def", "a.b.c.d", "a..c", ".b.c", "a.b.", "a.b.c."] {
			assert!(let Err(Error::MalformedToken(_)) = split_encoded_parts(token));
		}
	}

	#[test]
	fn test_encode_sign_then_verify() {
		let token = encode_sign(json_object!{"typ": "JWT"}, &json_object!{"iss": "onixbyte", "role": "admin"}, &engine(), &encoder()).unwrap();
		let verified = split_encoded_parts(&token).unwrap().verify(&engine(), &encoder()).unwrap();

		assert!(verified.header(&encoder()).unwrap() == json_object!{"alg": "HS256", "typ": "JWT"});
		assert!(verified.payload(&encoder()).unwrap() == json_object!{"iss": "onixbyte", "role": "admin"});
		assert!(verified.claims(&encoder()).unwrap().issuer() == Some("onixbyte"));

		let custom = verified.custom_claims(&encoder()).unwrap();
		assert!(custom.len() == 1);
		assert!(custom.get("role") == Some(&ClaimValue::from("admin")));
	}

	#[test]
	fn test_verify_rejects_bad_signatures() {
		let token = encode_sign(json_object!{"typ": "JWT"}, &json_object!{"a": 1}, &engine(), &encoder()).unwrap();
		let parts = split_encoded_parts(&token).unwrap();

		let other = HmacEngine::new(Algorithm::HS256, [b'b'; 32]).unwrap();
		assert!(let Err(Error::InvalidSignature) = parts.verify(&other, &encoder()));

		let garbage = CompactSerializedParts{signature: "not*base64", ..parts};
		assert!(let Err(Error::InvalidBase64(_)) = garbage.verify(&engine(), &encoder()));

		let truncated = CompactSerializedParts{signature: &parts.signature[..parts.signature.len() - 3], ..parts};
		assert!(let Err(Error::InvalidSignature) = truncated.verify(&engine(), &encoder()));
	}

	#[test]
	fn test_verify_rejects_foreign_alg() {
		// Valid HS256 MAC over a header that claims another algorithm.
		let engine = engine();
		let header  = encoder().encode(&json_object!{"alg": "none", "typ": "JWT"}).unwrap();
		let payload = encoder().encode(&json_object!{"sub": "user-1"}).unwrap();
		let signature = encode_base64(&engine.sign(header.as_bytes(), payload.as_bytes()).unwrap());
		let parts = CompactSerializedParts{header: &header, payload: &payload, signature: &signature};
		assert!(let Err(Error::AlgorithmMismatch(_)) = parts.verify(&engine, &encoder()));

		let header = encoder().encode(&json_object!{"typ": "JWT"}).unwrap();
		let signature = encode_base64(&engine.sign(header.as_bytes(), payload.as_bytes()).unwrap());
		let parts = CompactSerializedParts{header: &header, payload: &payload, signature: &signature};
		assert!(let Err(Error::AlgorithmMismatch(_)) = parts.verify(&engine, &encoder()));
	}

	#[test]
	fn test_unverified_header() {
		let token = encode_sign(json_object!{"typ": "JWT", "kid": "k1"}, &json_object!{}, &engine(), &encoder()).unwrap();
		let parts = split_encoded_parts(&token).unwrap();
		let header = parts.unverified_header(&encoder()).unwrap();
		assert!(header.get("kid") == Some(&JsonValue::from("k1")));
	}

	#[test]
	fn test_custom_claims_rejects_nested_values() {
		let token = encode_sign(json_object!{"typ": "JWT"}, &json_object!{"roles": ["a", "b"]}, &engine(), &encoder()).unwrap();
		let verified = split_encoded_parts(&token).unwrap().verify(&engine(), &encoder()).unwrap();
		assert!(let Err(Error::InvalidClaim(_)) = verified.custom_claims(&encoder()));
	}
}

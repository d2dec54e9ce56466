//! Verifying tokens and reading their contents.

use std::collections::BTreeMap;

use crate::claims::ClaimMap;
use crate::codec::{CanonicalEncoder, JsonCodec, SerdeJsonCodec};
use crate::compact::{split_encoded_parts, CompactSerializedParts, VerifiedToken};
use crate::hmac::HmacEngine;
use crate::payload::Claims;
use crate::{Algorithm, Result};

/// Verifies tokens and extracts their header and claims.
pub trait TokenResolver {
	/// Check the signature of a token.
	///
	/// Fails with [`Error::MalformedToken`](crate::Error::MalformedToken) if the token does not have three parts,
	/// and with [`Error::InvalidSignature`](crate::Error::InvalidSignature) if the signature does not match.
	fn verify(&self, token: &str) -> Result<()>;

	/// Decode the header of a token.
	///
	/// The signature is not checked, so the header must be treated as untrusted.
	fn header(&self, token: &str) -> Result<BTreeMap<String, String>>;

	/// Verify a token and return its custom claims, without any registered claim.
	fn payload(&self, token: &str) -> Result<ClaimMap>;

	/// Verify a token and return all of its claims.
	fn claims(&self, token: &str) -> Result<Claims>;

	/// Split a token into its encoded parts.
	fn split<'a>(&self, token: &'a str) -> Result<CompactSerializedParts<'a>> {
		split_encoded_parts(token)
	}
}

/// [`TokenResolver`] verifying HMAC signatures.
#[derive(Clone, Debug)]
pub struct HmacTokenResolver<C = SerdeJsonCodec> {
	engine  : HmacEngine,
	encoder : CanonicalEncoder<C>,
}

impl HmacTokenResolver {
	pub fn new(algorithm: Algorithm, secret: impl AsRef<[u8]>) -> Result<Self> {
		Self::with_codec(algorithm, secret, SerdeJsonCodec)
	}
}

impl<C: JsonCodec> HmacTokenResolver<C> {
	pub fn with_codec(algorithm: Algorithm, secret: impl AsRef<[u8]>, codec: C) -> Result<Self> {
		Ok(Self::from_engine(HmacEngine::new(algorithm, secret)?, codec))
	}

	pub fn from_engine(engine: HmacEngine, codec: C) -> Self {
		Self{engine, encoder: CanonicalEncoder::new(codec)}
	}

	pub fn algorithm(&self) -> Algorithm {
		self.engine.algorithm()
	}

	/// Split and verify a token.
	pub fn resolve<'a>(&self, token: &'a str) -> Result<VerifiedToken<'a>> {
		split_encoded_parts(token)?.verify(&self.engine, &self.encoder)
	}
}

impl<C: JsonCodec> TokenResolver for HmacTokenResolver<C> {
	fn verify(&self, token: &str) -> Result<()> {
		self.resolve(token)?;
		Ok(())
	}

	fn header(&self, token: &str) -> Result<BTreeMap<String, String>> {
		let parts = split_encoded_parts(token)?;
		self.encoder.decode_strings(parts.header.as_bytes())
	}

	fn payload(&self, token: &str) -> Result<ClaimMap> {
		self.resolve(token)?.custom_claims(&self.encoder)
	}

	fn claims(&self, token: &str) -> Result<Claims> {
		self.resolve(token)?.claims(&self.encoder)
	}
}

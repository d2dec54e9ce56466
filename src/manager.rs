//! Converting token payloads to and from application types.

use std::collections::BTreeMap;

use crate::claims::ClaimMap;
use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::compact::CompactSerializedParts;
use crate::creator::{HmacTokenCreator, TokenCreator};
use crate::hmac::HmacEngine;
use crate::payload::{Claims, TokenPayload};
use crate::resolver::{HmacTokenResolver, TokenResolver};
use crate::{Algorithm, Result};

/// Conversion between an application type and a map of custom claims.
///
/// Registered claims never reach [`to_object`](Self::to_object),
/// and [`to_map`](Self::to_map) must not produce them.
pub trait ObjectMapAdapter<T> {
	fn to_map(&self, object: &T) -> ClaimMap;

	fn to_object(&self, map: ClaimMap) -> Result<T>;
}

/// Token creator and resolver that also converts payloads to `T`.
pub trait TokenManager<T>: TokenCreator + TokenResolver {
	/// Verify a token and convert its custom claims to `T`.
	fn extract(&self, token: &str) -> Result<T>;

	/// Sign a token whose custom claims are taken from `object`.
	fn sign_object(&self, object: &T) -> Result<String>;
}

/// [`TokenManager`] using HMAC signatures and an [`ObjectMapAdapter`].
#[derive(Clone, Debug)]
pub struct HmacTokenManager<A, C = SerdeJsonCodec> {
	creator  : HmacTokenCreator<C>,
	resolver : HmacTokenResolver<C>,
	adapter  : A,
}

impl<A> HmacTokenManager<A> {
	pub fn new(algorithm: Algorithm, issuer: impl Into<String>, secret: impl AsRef<[u8]>, adapter: A) -> Result<Self> {
		Self::with_codec(algorithm, issuer, secret, adapter, SerdeJsonCodec)
	}
}

impl<A, C: JsonCodec + Clone> HmacTokenManager<A, C> {
	pub fn with_codec(algorithm: Algorithm, issuer: impl Into<String>, secret: impl AsRef<[u8]>, adapter: A, codec: C) -> Result<Self> {
		let engine = HmacEngine::new(algorithm, secret)?;
		Ok(Self::from_parts(
			HmacTokenCreator::from_engine(engine.clone(), issuer, codec.clone()),
			HmacTokenResolver::from_engine(engine, codec),
			adapter,
		))
	}
}

impl<A, C> HmacTokenManager<A, C> {
	pub fn from_parts(creator: HmacTokenCreator<C>, resolver: HmacTokenResolver<C>, adapter: A) -> Self {
		Self{creator, resolver, adapter}
	}

	pub fn creator(&self) -> &HmacTokenCreator<C> {
		&self.creator
	}

	pub fn resolver(&self) -> &HmacTokenResolver<C> {
		&self.resolver
	}

	pub fn adapter(&self) -> &A {
		&self.adapter
	}
}

impl<A, C: JsonCodec> TokenCreator for HmacTokenManager<A, C> {
	fn sign(&self, payload: &TokenPayload) -> Result<String> {
		self.creator.sign(payload)
	}
}

impl<A, C: JsonCodec> TokenResolver for HmacTokenManager<A, C> {
	fn verify(&self, token: &str) -> Result<()> {
		self.resolver.verify(token)
	}

	fn header(&self, token: &str) -> Result<BTreeMap<String, String>> {
		self.resolver.header(token)
	}

	fn payload(&self, token: &str) -> Result<ClaimMap> {
		self.resolver.payload(token)
	}

	fn claims(&self, token: &str) -> Result<Claims> {
		self.resolver.claims(token)
	}

	fn split<'a>(&self, token: &'a str) -> Result<CompactSerializedParts<'a>> {
		self.resolver.split(token)
	}
}

impl<T, A: ObjectMapAdapter<T>, C: JsonCodec> TokenManager<T> for HmacTokenManager<A, C> {
	fn extract(&self, token: &str) -> Result<T> {
		self.adapter.to_object(self.payload(token)?)
	}

	fn sign_object(&self, object: &T) -> Result<String> {
		let payload = self.adapter.to_map(object)
			.into_iter()
			.try_fold(TokenPayload::new(), |payload, (name, value)| payload.with_claim(name, value))?;
		self.sign(&payload)
	}
}

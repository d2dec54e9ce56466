//! This library creates and verifies HMAC-signed JSON Web Tokens.
//!
//! Tokens use the JWS Compact Serialization: three base64url encoded parts separated by periods,
//! `header.payload.signature`. The header and payload are JSON objects encoded with sorted keys,
//! so the same claims always produce the same token.
//!
//! The usual entry points are:
//!   - [`TokenPayload`] to build the claims of a token,
//!   - [`HmacTokenCreator`] to sign them,
//!   - [`HmacTokenResolver`] to verify a token and read its claims back,
//!   - [`HmacTokenManager`] to convert claims to and from application types through an [`ObjectMapAdapter`],
//!   - [`JwtConfig`] to build all of the above from settings.
//!
//! Signing and verifying at the lowest level is done through the [`Signer`] and [`Verifier`] traits,
//! implemented by [`HmacEngine`](crate::hmac::HmacEngine).
//!
//! ```
//! use simple_jwt::{Algorithm, HmacTokenCreator, HmacTokenResolver, TokenCreator, TokenPayload, TokenResolver};
//!
//! let secret = "a".repeat(32);
//! let creator = HmacTokenCreator::new(Algorithm::HS256, "onixbyte", &secret)?;
//! let resolver = HmacTokenResolver::new(Algorithm::HS256, &secret)?;
//!
//! let token = creator.sign(&TokenPayload::new().with_subject("user-1").with_claim("role", "admin")?)?;
//! let custom = resolver.payload(&token)?;
//! assert_eq!(custom["role"].as_str(), Some("admin"));
//! # Ok::<(), simple_jwt::Error>(())
//! ```

use std::collections::BTreeMap;

pub mod algorithm;
pub mod claims;
pub mod codec;
pub mod compact;
pub mod config;
pub mod creator;
pub mod error;
pub mod hmac;
pub mod manager;
pub mod payload;
pub mod resolver;
pub mod secret;

pub use serde_json::Value as JsonValue;
pub use crate::algorithm::Algorithm;
pub use crate::claims::{ClaimMap, ClaimValue};
pub use crate::codec::{CanonicalEncoder, JsonCodec, SerdeJsonCodec};
pub use crate::config::JwtConfig;
pub use crate::creator::{HmacTokenCreator, TokenCreator};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::manager::{HmacTokenManager, ObjectMapAdapter, TokenManager};
pub use crate::payload::{Claims, TokenPayload};
pub use crate::resolver::{HmacTokenResolver, TokenResolver};
pub use crate::secret::{create_secret, SecretOptions};

#[doc(hidden)]
pub use serde_json;

/// A JSON object with its keys in alphabetical order.
pub type JsonObject = BTreeMap<String, JsonValue>;

/// Create a [`JsonObject`] using the syntax of [`serde_json::json!`].
#[macro_export]
macro_rules! json_object {
	($($tokens:tt)*) => {
		match $crate::serde_json::json!({ $($tokens)* }) {
			$crate::JsonValue::Object(map) => map.into_iter().collect::<$crate::JsonObject>(),
			_ => unreachable!(),
		}
	};
}

/// A verifier for token signatures.
pub trait Verifier {
	/// Verify the signature of a token.
	///
	/// The MAC is computed over the raw encoded parts: `encoded_header || '.' || encoded_payload`.
	///
	/// If the signature is invalid, the function should return [`Error::InvalidSignature`].
	/// If the header asks for an algorithm the verifier does not use, it should return [`Error::AlgorithmMismatch`].
	/// It may also report any of the other error variants.
	///
	/// # Args:
	///   - header:          The decoded header, to find out which algorithm the token claims to use.
	///   - encoded_header:  The raw encoded header, needed to compute the MAC.
	///   - encoded_payload: The raw encoded payload, needed to compute the MAC.
	///   - signature:       The decoded signature of the token, to be tested against the computed MAC.
	fn verify(
		&self,
		header          : &JsonObject,
		encoded_header  : &[u8],
		encoded_payload : &[u8],
		signature       : &[u8],
	) -> Result<()>;
}

/// A signer for tokens.
pub trait Signer {
	/// Set the header parameters that indicate how the token should be verified.
	///
	/// This is the first step in the signing process, since the encoded header ends up in the signature.
	fn set_header_params(&self, header: &mut JsonObject);

	/// Compute the Message Authentication Code for the encoded header and encoded payload.
	///
	/// The returned MAC must be plain bytes, not hex or base64 encoded.
	fn compute_mac(&self, encoded_header: &[u8], encoded_payload: &[u8]) -> Result<Vec<u8>>;
}

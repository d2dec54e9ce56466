//! Error types for this crate.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	WeakSecret(#[from] WeakSecret),

	#[error(transparent)]
	UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),

	#[error(transparent)]
	Config(#[from] InvalidConfig),

	#[error(transparent)]
	MalformedToken(#[from] MalformedToken),

	/// The `alg` header parameter is missing or names another algorithm than the verifier.
	#[error(transparent)]
	AlgorithmMismatch(#[from] AlgorithmMismatch),

	/// The recomputed MAC does not match the token signature.
	///
	/// Deliberately carries no detail: a wrong key and a tampered token look the same.
	#[error("token signature verification failed")]
	InvalidSignature,

	#[error("invalid base64url segment: {0}")]
	InvalidBase64(#[from] base64::DecodeError),

	#[error("invalid JSON segment: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error(transparent)]
	InvalidClaim(#[from] InvalidClaim),

	#[error(transparent)]
	ReservedClaim(#[from] ReservedClaim),

	#[error(transparent)]
	Adapter(#[from] AdapterError),

	#[error(transparent)]
	Internal(#[from] InternalError),
}

/// Broad category of an [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
	/// Bad secret, algorithm or configuration value. Raised when building an engine.
	Configuration,
	/// The token does not have three non-empty segments.
	MalformedToken,
	/// The signature or the `alg` header parameter does not match.
	Verification,
	/// A segment is not valid base64url or JSON, or holds an unsupported claim value.
	Decode,
	/// A custom claim uses a registered claim name.
	ClaimNaming,
	/// The object-map adapter rejected a payload.
	Adapter,
	/// Failure of the underlying MAC primitive.
	Internal,
}

macro_rules! define_error_variant {
	($name:ident($description:expr)) => {
		#[derive(Clone, Debug, Eq, PartialEq)]
		pub struct $name(pub String);

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
				write!(f, "{}: {}", $description, self.0)
			}
		}

		impl std::error::Error for $name {}
	};
}

define_error_variant!(WeakSecret           ("secret too weak"));
define_error_variant!(UnsupportedAlgorithm ("unsupported MAC algorithm"));
define_error_variant!(InvalidConfig        ("invalid configuration"));
define_error_variant!(MalformedToken       ("malformed token"));
define_error_variant!(AlgorithmMismatch    ("token algorithm mismatch"));
define_error_variant!(InvalidClaim         ("invalid claim"));
define_error_variant!(ReservedClaim        ("registered claims must be set with their dedicated methods"));
define_error_variant!(AdapterError         ("object-map adapter failed"));
define_error_variant!(InternalError        ("internal error"));

impl Error {
	pub fn weak_secret(detail: impl Into<String>) -> Self {
		WeakSecret(detail.into()).into()
	}

	pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
		UnsupportedAlgorithm(name.into()).into()
	}

	pub fn invalid_config(detail: impl Into<String>) -> Self {
		InvalidConfig(detail.into()).into()
	}

	pub fn malformed_token(detail: impl Into<String>) -> Self {
		MalformedToken(detail.into()).into()
	}

	pub fn algorithm_mismatch(detail: impl Into<String>) -> Self {
		AlgorithmMismatch(detail.into()).into()
	}

	pub fn invalid_claim(detail: impl Into<String>) -> Self {
		InvalidClaim(detail.into()).into()
	}

	pub fn reserved_claim(name: impl Into<String>) -> Self {
		ReservedClaim(name.into()).into()
	}

	pub fn adapter(detail: impl Into<String>) -> Self {
		AdapterError(detail.into()).into()
	}

	pub fn internal(detail: impl Into<String>) -> Self {
		InternalError(detail.into()).into()
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::WeakSecret(_)           => ErrorKind::Configuration,
			Self::UnsupportedAlgorithm(_) => ErrorKind::Configuration,
			Self::Config(_)               => ErrorKind::Configuration,
			Self::MalformedToken(_)       => ErrorKind::MalformedToken,
			Self::AlgorithmMismatch(_)    => ErrorKind::Verification,
			Self::InvalidSignature        => ErrorKind::Verification,
			Self::InvalidBase64(_)        => ErrorKind::Decode,
			Self::InvalidJson(_)          => ErrorKind::Decode,
			Self::InvalidClaim(_)         => ErrorKind::Decode,
			Self::ReservedClaim(_)        => ErrorKind::ClaimNaming,
			Self::Adapter(_)              => ErrorKind::Adapter,
			Self::Internal(_)             => ErrorKind::Internal,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;

	#[test]
	fn test_display_includes_description_and_detail() {
		let error = Error::weak_secret("HS256 requires at least 32 bytes, got 16");
		assert!(error.to_string() == "secret too weak: HS256 requires at least 32 bytes, got 16");
		assert!(error.kind() == ErrorKind::Configuration);
	}

	#[test]
	fn test_invalid_signature_carries_no_detail() {
		assert!(Error::InvalidSignature.to_string() == "token signature verification failed");
		assert!(Error::InvalidSignature.kind() == ErrorKind::Verification);
	}

	#[test]
	fn test_kind_of_converted_errors() {
		let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		assert!(Error::from(json).kind() == ErrorKind::Decode);
		assert!(Error::reserved_claim("iss").kind() == ErrorKind::ClaimNaming);
		assert!(Error::malformed_token("two segments").kind() == ErrorKind::MalformedToken);
		assert!(Error::algorithm_mismatch("expected HS256, got none").kind() == ErrorKind::Verification);
	}
}

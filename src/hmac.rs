//! HMAC [`Signer`] and [`Verifier`] implementation using [RustCrypto](https://github.com/RustCrypto).

use std::fmt;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use zeroize::Zeroizing;

use crate::claims::header;
use crate::{Algorithm, Error, JsonObject, JsonValue, Result, Signer, Verifier};

type HmacSha256 = Hmac<sha2::Sha256>;
type HmacSha384 = Hmac<sha2::Sha384>;
type HmacSha512 = Hmac<sha2::Sha512>;

/// Compute the MAC of an encoded header and payload: `HMAC(key, header || '.' || payload)`.
///
/// This does not check the key length, use [`HmacEngine`] for that.
pub fn sign(algorithm: Algorithm, key: &[u8], encoded_header: &[u8], encoded_payload: &[u8]) -> Result<Vec<u8>> {
	match algorithm {
		Algorithm::HS256 => Ok(compute_mac(encoded_header, encoded_payload, new_mac::<HmacSha256>(key)?)),
		Algorithm::HS384 => Ok(compute_mac(encoded_header, encoded_payload, new_mac::<HmacSha384>(key)?)),
		Algorithm::HS512 => Ok(compute_mac(encoded_header, encoded_payload, new_mac::<HmacSha512>(key)?)),
	}
}

/// Check a signature against the MAC of an encoded header and payload.
///
/// The comparison runs in constant time.
pub fn verify(algorithm: Algorithm, key: &[u8], encoded_header: &[u8], encoded_payload: &[u8], signature: &[u8]) -> Result<bool> {
	match algorithm {
		Algorithm::HS256 => Ok(verify_mac(encoded_header, encoded_payload, signature, new_mac::<HmacSha256>(key)?)),
		Algorithm::HS384 => Ok(verify_mac(encoded_header, encoded_payload, signature, new_mac::<HmacSha384>(key)?)),
		Algorithm::HS512 => Ok(verify_mac(encoded_header, encoded_payload, signature, new_mac::<HmacSha512>(key)?)),
	}
}

/// Message signer and verifier for one HMAC algorithm and secret.
///
/// The secret is checked once, when the engine is created,
/// and is read-only afterwards, so an engine can be shared between threads.
#[derive(Clone)]
pub struct HmacEngine {
	algorithm : Algorithm,
	key       : Zeroizing<Vec<u8>>,
}

impl HmacEngine {
	/// Create an engine, rejecting secrets shorter than the hash output of the algorithm.
	pub fn new(algorithm: Algorithm, secret: impl AsRef<[u8]>) -> Result<Self> {
		let secret = secret.as_ref();
		algorithm.check_secret(secret)?;
		tracing::debug!(%algorithm, "created HMAC engine");
		Ok(Self{algorithm, key: Zeroizing::new(secret.to_vec())})
	}

	/// Create an engine from a JOSE algorithm name such as `"HS256"`.
	pub fn from_name(algorithm: &str, secret: impl AsRef<[u8]>) -> Result<Self> {
		Self::new(algorithm.parse()?, secret)
	}

	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Compute the MAC of an encoded header and payload.
	pub fn sign(&self, encoded_header: &[u8], encoded_payload: &[u8]) -> Result<Vec<u8>> {
		sign(self.algorithm, &self.key, encoded_header, encoded_payload)
	}

	/// Check a signature in constant time.
	pub fn is_valid(&self, encoded_header: &[u8], encoded_payload: &[u8], signature: &[u8]) -> Result<bool> {
		verify(self.algorithm, &self.key, encoded_header, encoded_payload, signature)
	}
}

impl fmt::Debug for HmacEngine {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("HmacEngine")
			.field("algorithm", &self.algorithm)
			.field("key", &"<redacted>")
			.finish()
	}
}

impl Signer for HmacEngine {
	fn set_header_params(&self, header: &mut JsonObject) {
		header.insert(header::ALGORITHM.to_string(), JsonValue::from(self.algorithm.name()));
	}

	fn compute_mac(&self, encoded_header: &[u8], encoded_payload: &[u8]) -> Result<Vec<u8>> {
		self.sign(encoded_header, encoded_payload)
	}
}

impl Verifier for HmacEngine {
	fn verify(&self, header: &JsonObject, encoded_header: &[u8], encoded_payload: &[u8], signature: &[u8]) -> Result<()> {
		let algorithm = header.get(header::ALGORITHM)
			.ok_or_else(|| Error::algorithm_mismatch(format!("token header has no \"alg\" parameter, expected {}", self.algorithm)))?;
		if algorithm.as_str() != Some(self.algorithm.name()) {
			tracing::debug!(algorithm = %self.algorithm, "token algorithm mismatch");
			return Err(Error::algorithm_mismatch(format!("expected {}, got {}", self.algorithm, algorithm)));
		}

		if self.is_valid(encoded_header, encoded_payload, signature)? {
			Ok(())
		} else {
			tracing::debug!(algorithm = %self.algorithm, "token signature mismatch");
			Err(Error::InvalidSignature)
		}
	}
}

fn new_mac<M: Mac + KeyInit>(key: &[u8]) -> Result<M> {
	<M as KeyInit>::new_from_slice(key).map_err(|e| Error::internal(format!("failed to initialise HMAC: {}", e)))
}

/// Feed the encoded header and payload to a MAC in the proper format.
fn feed_mac(encoded_header: &[u8], encoded_payload: &[u8], mac: &mut impl Mac) {
	mac.update(encoded_header);
	mac.update(b".");
	mac.update(encoded_payload);
}

/// Compute the Message Authentication Code for the MAC function.
fn compute_mac<M: Mac>(encoded_header: &[u8], encoded_payload: &[u8], mut mac: M) -> Vec<u8> {
	feed_mac(encoded_header, encoded_payload, &mut mac);
	mac.finalize().into_bytes().to_vec()
}

/// Verify the signature of a JWS Compact Serialization message.
fn verify_mac<M: Mac>(encoded_header: &[u8], encoded_payload: &[u8], signature: &[u8], mut mac: M) -> bool {
	feed_mac(encoded_header, encoded_payload, &mut mac);
	mac.verify_slice(signature).is_ok()
}

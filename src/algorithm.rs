//! The MAC algorithms supported for signing tokens.

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::{Error, Result};

/// HMAC algorithm used to sign and verify tokens.
///
/// The serialized form is the JOSE algorithm name as used in the `alg` header parameter.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
	/// HMAC using SHA-256.
	#[default]
	HS256,
	/// HMAC using SHA-384.
	HS384,
	/// HMAC using SHA-512.
	HS512,
}

impl Algorithm {
	pub const ALL: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

	/// The JOSE name of the algorithm.
	pub fn name(self) -> &'static str {
		match self {
			Self::HS256 => "HS256",
			Self::HS384 => "HS384",
			Self::HS512 => "HS512",
		}
	}

	/// Output size of the underlying hash in bits.
	pub fn sha_length(self) -> usize {
		match self {
			Self::HS256 => 256,
			Self::HS384 => 384,
			Self::HS512 => 512,
		}
	}

	/// Minimum secret length in bytes: the hash output size.
	pub fn min_secret_length(self) -> usize {
		self.sha_length() >> 3
	}

	/// Check that a secret is long enough for this algorithm.
	pub fn check_secret(self, secret: &[u8]) -> Result<()> {
		let min = self.min_secret_length();
		if secret.len() < min {
			return Err(Error::weak_secret(format!(
				"secret key too short for {}: minimum {} bytes required, got {}",
				self, min, secret.len(),
			)));
		}
		Ok(())
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Algorithm {
	type Err = Error;

	fn from_str(name: &str) -> Result<Self> {
		Self::ALL.iter()
			.copied()
			.find(|algorithm| algorithm.name() == name)
			.ok_or_else(|| Error::unsupported_algorithm(name))
	}
}

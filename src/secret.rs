//! Random secret generation.

use rand::Rng;

use crate::{Error, Result};

const LOWERCASE : &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE : &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS    : &str = "0123456789";
const SPECIAL   : &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?";

/// Shortest secret [`create_secret`] agrees to produce.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Which characters a generated secret may contain.
///
/// Lowercase letters are always included.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SecretOptions {
	pub length    : usize,
	pub uppercase : bool,
	pub digits    : bool,
	pub special   : bool,
}

impl SecretOptions {
	/// Lowercase letters only.
	pub fn new(length: usize) -> Self {
		Self{length, uppercase: false, digits: false, special: false}
	}

	/// Every character class enabled.
	pub fn strong(length: usize) -> Self {
		Self{length, uppercase: true, digits: true, special: true}
	}

	pub fn with_uppercase(mut self, uppercase: bool) -> Self {
		self.uppercase = uppercase;
		self
	}

	pub fn with_digits(mut self, digits: bool) -> Self {
		self.digits = digits;
		self
	}

	pub fn with_special(mut self, special: bool) -> Self {
		self.special = special;
		self
	}

	fn charset(&self) -> Vec<u8> {
		let mut charset = LOWERCASE.as_bytes().to_vec();
		if self.uppercase {
			charset.extend_from_slice(UPPERCASE.as_bytes());
		}
		if self.digits {
			charset.extend_from_slice(DIGITS.as_bytes());
		}
		if self.special {
			charset.extend_from_slice(SPECIAL.as_bytes());
		}
		charset
	}
}

/// Generate a random ASCII secret.
///
/// Secrets shorter than [`MIN_SECRET_LENGTH`] are refused with [`Error::WeakSecret`].
/// Note that HS384 and HS512 need longer secrets than the minimum.
pub fn create_secret(options: &SecretOptions) -> Result<String> {
	if options.length < MIN_SECRET_LENGTH {
		return Err(Error::weak_secret(format!(
			"a secret of only {} characters is too weak, use at least {}",
			options.length, MIN_SECRET_LENGTH,
		)));
	}

	Ok(generate(options))
}

/// Generate a secret without checking its length.
pub(crate) fn generate(options: &SecretOptions) -> String {
	let charset = options.charset();
	let mut rng = rand::rng();
	(0..options.length)
		.map(|_| char::from(charset[rng.random_range(0..charset.len())]))
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;

	#[test]
	fn test_rejects_short_secrets() {
		assert!(let Err(Error::WeakSecret(_)) = create_secret(&SecretOptions::strong(31)));
		assert!(let Ok(_) = create_secret(&SecretOptions::strong(32)));
	}

	#[test]
	fn test_length_and_charset() {
		let secret = create_secret(&SecretOptions::new(64)).unwrap();
		assert!(secret.len() == 64);
		assert!(secret.bytes().all(|c| c.is_ascii_lowercase()));

		let secret = create_secret(&SecretOptions::new(48).with_digits(true)).unwrap();
		assert!(secret.len() == 48);
		assert!(secret.bytes().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
	}

	#[test]
	fn test_secrets_differ() {
		let options = SecretOptions::strong(32);
		assert!(create_secret(&options).unwrap() != create_secret(&options).unwrap());
	}
}

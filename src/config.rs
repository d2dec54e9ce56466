//! Token settings that can be loaded from JSON or environment variables.

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::creator::HmacTokenCreator;
use crate::hmac::HmacEngine;
use crate::manager::HmacTokenManager;
use crate::resolver::HmacTokenResolver;
use crate::secret::{generate, SecretOptions};
use crate::{Algorithm, Error, Result};

/// Default prefix of the environment variables read by [`JwtConfig::from_env`].
pub const ENV_PREFIX: &str = "SIMPLE_JWT_";

/// Length of the secret generated when none is configured.
///
/// Long enough for every supported algorithm.
const GENERATED_SECRET_LENGTH: usize = 64;

/// Settings for creating, resolving and managing tokens.
///
/// Missing fields take their default value.
/// Without a configured secret a random one is generated,
/// so tokens only verify within the same configuration instance.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct JwtConfig {
	pub algorithm : Algorithm,
	pub issuer    : String,
	pub secret    : String,
	pub key_id    : Option<String>,
}

impl Default for JwtConfig {
	fn default() -> Self {
		Self {
			algorithm : Algorithm::default(),
			issuer    : String::new(),
			secret    : generate(&SecretOptions::strong(GENERATED_SECRET_LENGTH)),
			key_id    : None,
		}
	}
}

impl fmt::Debug for JwtConfig {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("JwtConfig")
			.field("algorithm", &self.algorithm)
			.field("issuer", &self.issuer)
			.field("secret", &"<redacted>")
			.field("key_id", &self.key_id)
			.finish()
	}
}

impl JwtConfig {
	/// Parse settings from a JSON document.
	pub fn from_json(data: &str) -> Result<Self> {
		serde_json::from_str(data).map_err(|e| Error::invalid_config(e.to_string()))
	}

	/// Read settings from `SIMPLE_JWT_ALGORITHM`, `SIMPLE_JWT_ISSUER`, `SIMPLE_JWT_SECRET` and `SIMPLE_JWT_KEY_ID`.
	pub fn from_env() -> Result<Self> {
		Self::from_env_with_prefix(ENV_PREFIX)
	}

	/// Read settings from environment variables with a custom prefix.
	pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
		Self::from_lookup(|name| {
			match std::env::var(format!("{}{}", prefix, name)) {
				Ok(value) => Ok(Some(value)),
				Err(std::env::VarError::NotPresent) => Ok(None),
				Err(std::env::VarError::NotUnicode(_)) => Err(Error::invalid_config(format!("{}{} is not valid unicode", prefix, name))),
			}
		})
	}

	/// Build settings from a variable lookup, falling back to defaults for missing variables.
	pub fn from_lookup(lookup: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
		let mut config = Self::default();
		if let Some(algorithm) = lookup("ALGORITHM")? {
			config.algorithm = algorithm.trim().parse()?;
		}
		if let Some(issuer) = lookup("ISSUER")? {
			config.issuer = issuer;
		}
		if let Some(secret) = lookup("SECRET")? {
			config.secret = secret;
		}
		if let Some(key_id) = lookup("KEY_ID")? {
			config.key_id = Some(key_id).filter(|x| !x.is_empty());
		}
		tracing::debug!(algorithm = %config.algorithm, issuer = %config.issuer, "loaded token configuration");
		Ok(config)
	}

	/// Create the signature engine, checking the secret length.
	pub fn engine(&self) -> Result<HmacEngine> {
		HmacEngine::new(self.algorithm, self.secret.as_bytes())
	}

	pub fn creator(&self) -> Result<HmacTokenCreator> {
		let creator = HmacTokenCreator::new(self.algorithm, self.issuer.as_str(), self.secret.as_bytes())?;
		Ok(match &self.key_id {
			Some(key_id) => creator.with_key_id(key_id.as_str()),
			None => creator,
		})
	}

	pub fn resolver(&self) -> Result<HmacTokenResolver> {
		HmacTokenResolver::new(self.algorithm, self.secret.as_bytes())
	}

	pub fn manager<A>(&self, adapter: A) -> Result<HmacTokenManager<A>> {
		Ok(HmacTokenManager::from_parts(self.creator()?, self.resolver()?, adapter))
	}
}

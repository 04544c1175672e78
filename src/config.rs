//! Resolver configuration loaded from code or JSON documents.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	locator::{AccessLevel, ResolveOptions},
};

/// Tunables applied to every request a resolver issues.
///
/// Missing JSON fields fall back to the defaults: guest access, one-hour URLs, existence
/// validation enabled, and no resolve timeout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	/// Access tier forwarded to the locator.
	pub access_level: AccessLevel,
	/// Requested URL lifetime in seconds.
	pub expires_in: u32,
	/// Whether the locator should confirm the object exists.
	pub validate_existence: bool,
	/// Optional upper bound on a single locator call, in milliseconds.
	pub resolve_timeout_ms: Option<u64>,
}
impl ResolverConfig {
	/// Longest URL lifetime accepted (seven days, the usual presign ceiling).
	pub const MAX_EXPIRES_IN: u32 = 604_800;

	/// Parses and validates a JSON configuration document.
	pub fn from_json(payload: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(payload);
		let config: Self =
			serde_path_to_error::deserialize(&mut de).map_err(ConfigError::from)?;

		config.validate()?;

		Ok(config)
	}

	/// Overrides the access level.
	pub fn with_access_level(mut self, level: AccessLevel) -> Self {
		self.access_level = level;

		self
	}

	/// Sets a resolve timeout.
	pub fn with_resolve_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.resolve_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));

		self
	}

	/// Checks that every field is within its supported range.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.expires_in == 0 {
			return Err(ConfigError::NonPositiveExpiresIn);
		}
		if self.expires_in > Self::MAX_EXPIRES_IN {
			return Err(ConfigError::ExpiresInOutOfRange { max: Self::MAX_EXPIRES_IN });
		}
		if self.resolve_timeout_ms == Some(0) {
			return Err(ConfigError::ZeroTimeout);
		}

		Ok(())
	}

	/// Builds the options attached to each request.
	pub fn resolve_options(&self) -> ResolveOptions {
		ResolveOptions::default()
			.with_access_level(self.access_level)
			.with_expires_in(Duration::seconds(i64::from(self.expires_in)))
			.with_validate_existence(self.validate_existence)
	}

	/// Returns the resolve timeout, if configured.
	pub fn resolve_timeout(&self) -> Option<std::time::Duration> {
		self.resolve_timeout_ms.map(std::time::Duration::from_millis)
	}
}
impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			access_level: AccessLevel::Guest,
			expires_in: 3600,
			validate_existence: true,
			resolve_timeout_ms: None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		let config = ResolverConfig::from_json("{}").expect("Empty config should parse.");

		assert_eq!(config, ResolverConfig::default());
		assert_eq!(config.resolve_options(), ResolveOptions::default());
		assert_eq!(config.resolve_timeout(), None);
	}

	#[test]
	fn fields_override_defaults() {
		let config = ResolverConfig::from_json(
			"{\"access_level\":\"private\",\"expires_in\":900,\"validate_existence\":false,\"resolve_timeout_ms\":2500}",
		)
		.expect("Full config should parse.");
		let options = config.resolve_options();

		assert_eq!(options.access_level, AccessLevel::Private);
		assert_eq!(options.expires_in, Duration::minutes(15));
		assert!(!options.validate_existence);
		assert_eq!(config.resolve_timeout(), Some(std::time::Duration::from_millis(2500)));
	}

	#[test]
	fn parse_errors_name_the_field() {
		let err = ResolverConfig::from_json("{\"access_level\":\"public\"}")
			.expect_err("Unknown access levels should be rejected.");

		assert!(
			matches!(&err, Error::Config(ConfigError::Parse { path, .. }) if path == "access_level"),
			"Unexpected error: {err:?}."
		);
	}

	#[test]
	fn ranges_are_validated() {
		assert!(matches!(
			ResolverConfig::from_json("{\"expires_in\":0}"),
			Err(Error::Config(ConfigError::NonPositiveExpiresIn))
		));
		assert!(matches!(
			ResolverConfig::from_json("{\"expires_in\":604801}"),
			Err(Error::Config(ConfigError::ExpiresInOutOfRange { max: 604_800 }))
		));
		assert!(matches!(
			ResolverConfig::from_json("{\"resolve_timeout_ms\":0}"),
			Err(Error::Config(ConfigError::ZeroTimeout))
		));
		ResolverConfig::default()
			.with_resolve_timeout(std::time::Duration::from_secs(1))
			.validate()
			.expect("A positive timeout should validate.");
	}
}

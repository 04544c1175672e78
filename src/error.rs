//! Crate-level error types shared by key parsing and resolver configuration.
//!
//! Resolution failures are deliberately absent here: they travel as
//! [`LocatorError`](crate::locator::LocatorError) values inside the observed state and never
//! surface as `Err` from resolver calls.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage key failed validation.
	#[error(transparent)]
	Key(#[from] crate::key::KeyError),
	/// Resolver configuration is malformed or out of range.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Configuration and validation failures raised while building a resolver.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration document could not be parsed.
	#[error("Resolver configuration is malformed at `{path}`.")]
	Parse {
		/// Dotted path of the field that failed to parse.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Configured URL lifetime is zero.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Configured URL lifetime exceeds what presigned URLs support.
	#[error("The expires_in value exceeds {max} seconds.")]
	ExpiresInOutOfRange {
		/// Largest accepted lifetime in seconds.
		max: u32,
	},
	/// Configured resolve timeout is zero.
	#[error("The resolve timeout must be positive when set.")]
	ZeroTimeout,
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

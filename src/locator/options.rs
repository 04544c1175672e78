//! Pass-through options attached to every resolve request.

// std
use std::str::FromStr;
// self
use crate::_prelude::*;

/// Visibility tier the object is stored under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
	/// Readable by anyone, including unauthenticated callers.
	#[default]
	Guest,
	/// Readable only by the owning identity.
	Private,
	/// Readable by any authenticated identity, writable by the owner.
	Protected,
}
impl AccessLevel {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AccessLevel::Guest => "guest",
			AccessLevel::Private => "private",
			AccessLevel::Protected => "protected",
		}
	}
}
impl Display for AccessLevel {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AccessLevel {
	type Err = UnknownAccessLevel;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"guest" => Ok(Self::Guest),
			"private" => Ok(Self::Private),
			"protected" => Ok(Self::Protected),
			other => Err(UnknownAccessLevel(other.to_owned())),
		}
	}
}

/// Error returned when parsing an unrecognized access level label.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown access level `{0}`.")]
pub struct UnknownAccessLevel(
	/// Label that failed to parse.
	pub String,
);

/// Backend options forwarded untouched with each request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolveOptions {
	/// Access tier of the object.
	pub access_level: AccessLevel,
	/// Requested lifetime of the issued URL.
	pub expires_in: Duration,
	/// Whether the backend should confirm the object exists before issuing a URL.
	pub validate_existence: bool,
}
impl ResolveOptions {
	/// Default URL lifetime (one hour).
	pub const DEFAULT_EXPIRES_IN: Duration = Duration::hours(1);

	/// Overrides the access level.
	pub fn with_access_level(mut self, level: AccessLevel) -> Self {
		self.access_level = level;

		self
	}

	/// Overrides the URL lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = expires_in;

		self
	}

	/// Overrides the existence check.
	pub fn with_validate_existence(mut self, validate: bool) -> Self {
		self.validate_existence = validate;

		self
	}
}
impl Default for ResolveOptions {
	fn default() -> Self {
		Self {
			access_level: AccessLevel::default(),
			expires_in: Self::DEFAULT_EXPIRES_IN,
			validate_existence: true,
		}
	}
}

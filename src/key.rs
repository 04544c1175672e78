//! Strongly typed storage keys.
//!
//! A [`StorageKey`] is an opaque path (for example `public/images/hero.jpg`) naming a stored
//! object. The resolver never interprets its segments; it only compares keys for equality.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

/// Largest accepted key length in bytes, matching common object-store limits.
pub const KEY_MAX_LEN: usize = 1024;

/// Error returned when key validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum KeyError {
	/// The key was empty.
	#[error("Storage key cannot be empty.")]
	Empty,
	/// The key contains an ASCII control character.
	#[error("Storage key contains a control character at byte {index}.")]
	ControlCharacter {
		/// Byte offset of the offending character.
		index: usize,
	},
	/// The key exceeded the allowed byte length.
	#[error("Storage key exceeds {max} bytes.")]
	TooLong {
		/// Maximum permitted byte length.
		max: usize,
	},
}

/// Opaque identifier for a stored object.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);
impl StorageKey {
	/// Creates a new key after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, KeyError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Parses an optional raw path, treating the empty string as "no key requested".
	pub fn parse_optional(value: &str) -> Result<Option<Self>, KeyError> {
		if value.is_empty() {
			return Ok(None);
		}

		Self::new(value).map(Some)
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for StorageKey {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for StorageKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for StorageKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<StorageKey> for String {
	fn from(value: StorageKey) -> Self {
		value.0
	}
}
impl TryFrom<String> for StorageKey {
	type Error = KeyError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl TryFrom<&str> for StorageKey {
	type Error = KeyError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for StorageKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "StorageKey({})", self.0)
	}
}
impl Display for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), KeyError> {
	if view.is_empty() {
		return Err(KeyError::Empty);
	}
	if let Some((index, _)) = view.char_indices().find(|(_, c)| c.is_ascii_control()) {
		return Err(KeyError::ControlCharacter { index });
	}
	if view.len() > KEY_MAX_LEN {
		return Err(KeyError::TooLong { max: KEY_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn keys_validate_content() {
		assert_eq!(StorageKey::new(""), Err(KeyError::Empty));
		assert_eq!(StorageKey::new("a\nb"), Err(KeyError::ControlCharacter { index: 1 }));

		let key = StorageKey::new("public/images/hero image.jpg")
			.expect("Keys with spaces should be accepted.");

		assert_eq!(key.as_str(), "public/images/hero image.jpg");
	}

	#[test]
	fn length_limit_is_inclusive() {
		let exact = "k".repeat(KEY_MAX_LEN);

		StorageKey::new(&exact).expect("Exact length should succeed.");

		let too_long = "k".repeat(KEY_MAX_LEN + 1);

		assert_eq!(StorageKey::new(&too_long), Err(KeyError::TooLong { max: KEY_MAX_LEN }));
	}

	#[test]
	fn empty_raw_path_means_absent() {
		assert_eq!(StorageKey::parse_optional(""), Ok(None));
		assert_eq!(
			StorageKey::parse_optional("missing.jpg").map(|key| key.map(String::from)),
			Ok(Some("missing.jpg".to_owned()))
		);
		assert!(StorageKey::parse_optional("\u{7f}").is_err());
	}

	#[test]
	fn serde_enforces_validation() {
		let key: StorageKey = serde_json::from_str("\"public/hero.jpg\"")
			.expect("Key should deserialize successfully.");

		assert_eq!(key.as_str(), "public/hero.jpg");
		assert!(serde_json::from_str::<StorageKey>("\"\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<StorageKey, u8> = HashMap::from_iter([(
			StorageKey::new("a.jpg").expect("Key used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("a.jpg"), Some(&7));
	}
}

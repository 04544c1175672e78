//! Resource locator contract and built-in locators.
//!
//! A [`ResourceLocator`] is the resolver's only dependency on a storage backend: it turns a
//! [`ResolveRequest`] into a time-limited [`SignedUrl`] or a [`LocatorError`]. Locators are
//! always injected, so tests substitute [`MemoryLocator`] or [`ManualLocator`] for a real
//! object-store client.

pub mod manual;
pub mod memory;
pub mod options;

pub use manual::ManualLocator;
pub use memory::MemoryLocator;
pub use options::*;

// self
use crate::{_prelude::*, key::StorageKey};

/// Boxed future returned by [`ResourceLocator::resolve`].
pub type LocatorFuture = Pin<Box<dyn Future<Output = Result<SignedUrl, LocatorError>> + Send>>;

/// Backend capable of resolving storage keys into access URLs.
///
/// The resolver calls [`resolve`](ResourceLocator::resolve) exactly once per distinct request
/// and may drop interest in the returned future at any time. The future must own whatever
/// state it needs (clone an `Arc` into it rather than borrowing `self`) so attempts can be
/// spawned independently of the locator's lifetime.
pub trait ResourceLocator
where
	Self: Send + Sync,
{
	/// Starts resolving `request`.
	fn resolve(&self, request: &ResolveRequest) -> LocatorFuture;
}

/// Resolution request passed to a [`ResourceLocator`].
///
/// Two requests are equal when both the key and the options match; the resolver uses this
/// equality to suppress duplicate calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolveRequest {
	/// Key naming the stored object.
	pub key: StorageKey,
	/// Pass-through options for the backend.
	pub options: ResolveOptions,
}
impl ResolveRequest {
	/// Creates a request for `key` with the provided options.
	pub fn new(key: StorageKey, options: ResolveOptions) -> Self {
		Self { key, options }
	}
}

/// Time-limited URL produced by a locator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedUrl {
	/// URL the consumer can fetch directly.
	pub url: Url,
	/// Instant after which the URL stops working, when the backend reports it.
	pub expires_at: Option<OffsetDateTime>,
}
impl SignedUrl {
	/// Wraps a URL without expiry metadata.
	pub fn new(url: Url) -> Self {
		Self { url, expires_at: None }
	}

	/// Attaches the instant the URL expires.
	pub fn with_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Returns `true` if the URL has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}

/// Failure reported by a locator, normalized into a cloneable value.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LocatorError {
	/// No object is stored under the key.
	#[error("No object is stored under `{key}`.")]
	NotFound {
		/// Key that was looked up.
		key: String,
	},
	/// The caller is not allowed to read the key at the requested access level.
	#[error("Access to `{key}` was denied.")]
	AccessDenied {
		/// Key that was looked up.
		key: String,
	},
	/// Backend credentials expired before the URL could be issued.
	#[error("Storage credentials have expired.")]
	ExpiredCredentials,
	/// The locator did not settle within the configured resolve timeout.
	#[error("Resolution did not settle within {} ms.", .timeout.as_millis())]
	TimedOut {
		/// Timeout that elapsed.
		timeout: std::time::Duration,
	},
	/// Any other failure, carrying the original message.
	#[error("{message}")]
	Other {
		/// Message of the wrapped failure.
		message: String,
	},
}
impl LocatorError {
	/// Wraps an arbitrary failure, preserving its message.
	pub fn other(failure: impl Display) -> Self {
		Self::Other { message: failure.to_string() }
	}

	/// Builds a [`LocatorError::NotFound`] for `key`.
	pub fn not_found(key: &StorageKey) -> Self {
		Self::NotFound { key: key.to_string() }
	}

	/// Builds a [`LocatorError::AccessDenied`] for `key`.
	pub fn access_denied(key: &StorageKey) -> Self {
		Self::AccessDenied { key: key.to_string() }
	}
}

//! In-process [`ResourceLocator`] backed by a key map, for local development and tests.

// self
use crate::{
	_prelude::*,
	key::StorageKey,
	locator::{LocatorError, LocatorFuture, ResolveRequest, ResourceLocator, SignedUrl},
};

type EntryMap = Arc<Mutex<HashMap<StorageKey, Result<Url, LocatorError>>>>;

/// Locator that answers immediately from an in-memory map.
///
/// Every call is counted so tests can assert how many times the resolver reached the backend.
/// Keys without an entry resolve to [`LocatorError::NotFound`] when the request asks for an
/// existence check; otherwise they resolve against the optional unvalidated base URL.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocator {
	entries: EntryMap,
	calls: Arc<Mutex<Vec<ResolveRequest>>>,
	unvalidated_base: Option<Url>,
}
impl MemoryLocator {
	/// Sets the base URL used for keys without an entry when existence is not validated.
	pub fn with_unvalidated_base(mut self, base: Url) -> Self {
		self.unvalidated_base = Some(base);

		self
	}

	/// Registers the URL returned for `key`.
	pub fn insert(&self, key: StorageKey, url: Url) {
		self.entries.lock().insert(key, Ok(url));
	}

	/// Registers the failure returned for `key`.
	pub fn insert_failure(&self, key: StorageKey, error: LocatorError) {
		self.entries.lock().insert(key, Err(error));
	}

	/// Removes any entry for `key`.
	pub fn remove(&self, key: &str) {
		self.entries.lock().remove(key);
	}

	/// Returns every request received so far, oldest first.
	pub fn calls(&self) -> Vec<ResolveRequest> {
		self.calls.lock().clone()
	}

	/// Returns how many requests were received.
	pub fn call_count(&self) -> usize {
		self.calls.lock().len()
	}

	fn resolve_now(&self, request: &ResolveRequest) -> Result<SignedUrl, LocatorError> {
		let now = OffsetDateTime::now_utc();
		let url = match self.entries.lock().get(&request.key) {
			Some(entry) => entry.clone()?,
			None if request.options.validate_existence =>
				return Err(LocatorError::not_found(&request.key)),
			None => self
				.unvalidated_base
				.as_ref()
				.ok_or_else(|| LocatorError::not_found(&request.key))?
				.join(request.key.as_str())
				.map_err(LocatorError::other)?,
		};

		Ok(SignedUrl::new(url).with_expires_at(now + request.options.expires_in))
	}
}
impl ResourceLocator for MemoryLocator {
	fn resolve(&self, request: &ResolveRequest) -> LocatorFuture {
		self.calls.lock().push(request.clone());

		let outcome = self.resolve_now(request);

		Box::pin(async move { outcome })
	}
}

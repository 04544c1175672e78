//! Key-driven resolver with last-request-wins semantics.
//!
//! [`KeyedResolver`] tracks the key a caller currently cares about and the latest stored
//! [`Resolution`]. Every change of key bumps a generation counter; an [`Attempt`] commits its
//! locator outcome only if the generation it captured is still current, so results for keys the
//! caller moved away from (or for a disposed resolver) are dropped regardless of arrival order.
//! The [`ObservedState`] is derived from the current request and the stored resolution on every
//! read and published to subscribers whenever it changes.

pub mod attempt;
pub mod state;

pub use attempt::*;
pub use state::*;

// crates.io
use parking_lot::MutexGuard;
use tokio::sync::watch;
// self
use crate::{
	_prelude::*,
	config::ResolverConfig,
	key::StorageKey,
	locator::{
		AccessLevel, LocatorError, ResolveOptions, ResolveRequest, ResourceLocator, SignedUrl,
	},
	obs::{self, ResolveOutcome, ResolveSpan},
};

#[derive(Debug)]
struct Inner {
	generation: u64,
	options: ResolveOptions,
	request: Option<ResolveRequest>,
	resolution: Option<Resolution>,
	disposed: bool,
}
impl Inner {
	fn observe(&self) -> ObservedState {
		ObservedState::derive(self.request.as_ref(), self.resolution.as_ref())
	}

	fn supersede(&mut self) {
		self.generation = self.generation.wrapping_add(1);
	}
}

/// State shared between a resolver and the attempts it issued.
///
/// Attempts only hold a [`Weak`] handle, so dropping the resolver releases everything.
pub(crate) struct Shared {
	inner: Mutex<Inner>,
	state: watch::Sender<ObservedState>,
}
impl Shared {
	pub(crate) fn is_current(&self, generation: u64) -> bool {
		let inner = self.inner.lock();

		!inner.disposed && inner.generation == generation
	}

	// Publishing under the state lock keeps subscriber order identical to commit order.
	fn publish(&self, inner: &Inner) {
		let next = inner.observe();

		self.state.send_if_modified(|current| {
			if *current == next {
				return false;
			}

			*current = next;

			true
		});
	}

	fn commit(
		&self,
		generation: u64,
		request: ResolveRequest,
		result: Result<SignedUrl, LocatorError>,
	) -> AttemptOutcome {
		let mut inner = self.inner.lock();

		if inner.disposed || inner.generation != generation {
			return AttemptOutcome::Superseded;
		}

		let (outcome, label) = match result {
			Ok(signed) => (Outcome::Success(signed), ResolveOutcome::Success),
			Err(e) => (Outcome::Failure(e), ResolveOutcome::Failure),
		};

		inner.resolution = Some(Resolution { request, outcome });
		self.publish(&inner);

		drop(inner);
		obs::record_resolve_outcome(label);

		AttemptOutcome::Committed
	}
}

/// Resolves the caller's current storage key into an [`ObservedState`].
///
/// The resolver never awaits anything itself. [`issue`](Self::issue) updates state
/// synchronously, invokes the locator once for each new request, and hands back an [`Attempt`]
/// the caller drives (await it, or [`spawn`](Attempt::spawn) it). Failures from the locator
/// become [`ObservedState::error`] values; nothing the locator does can make resolver calls
/// fail.
///
/// Do not hold a [`watch::Ref`] from [`subscribe`](Self::subscribe) across calls into the
/// resolver; state changes publish while the resolver's lock is held.
pub struct KeyedResolver {
	locator: Arc<dyn ResourceLocator>,
	timeout: Option<std::time::Duration>,
	shared: Arc<Shared>,
}
impl KeyedResolver {
	/// Creates a resolver with the default configuration.
	pub fn new(locator: Arc<dyn ResourceLocator>) -> Self {
		Self::build(locator, &ResolverConfig::default())
	}

	/// Creates a resolver after validating `config`.
	pub fn with_config(locator: Arc<dyn ResourceLocator>, config: ResolverConfig) -> Result<Self> {
		config.validate()?;

		Ok(Self::build(locator, &config))
	}

	fn build(locator: Arc<dyn ResourceLocator>, config: &ResolverConfig) -> Self {
		let inner = Inner {
			generation: 0,
			options: config.resolve_options(),
			request: None,
			resolution: None,
			disposed: false,
		};
		let (state, _) = watch::channel(ObservedState::IDLE);

		Self {
			locator,
			timeout: config.resolve_timeout(),
			shared: Arc::new(Shared { inner: Mutex::new(inner), state }),
		}
	}

	/// Requests `key`, superseding whatever was requested before.
	///
	/// - `None` clears the stored resolution and reports [`ObservedState::IDLE`] immediately.
	/// - The key already requested (with the same options) is a no-op.
	/// - Any other key reports loading, calls the locator once, and returns the attempt that will
	///   settle that call.
	///
	/// Returns `None` whenever no locator call was made, including after
	/// [`dispose`](Self::dispose).
	pub fn issue(&self, key: Option<StorageKey>) -> Option<Attempt> {
		let mut inner = self.shared.inner.lock();

		if inner.disposed {
			return None;
		}

		let Some(key) = key else {
			inner.supersede();
			inner.request = None;
			inner.resolution = None;
			self.shared.publish(&inner);

			return None;
		};
		let request = ResolveRequest::new(key, inner.options.clone());

		self.start(inner, request, false)
	}

	/// Requests a raw storage path; the empty string means "no key".
	pub fn issue_path(&self, path: &str) -> Result<Option<Attempt>> {
		let key = StorageKey::parse_optional(path)?;

		Ok(self.issue(key))
	}

	/// Re-resolves the current key even though it was already requested.
	///
	/// Useful once a committed URL is close to expiry, or when a previous attempt was dropped
	/// without being driven. Returns `None` without a current key.
	pub fn refresh(&self) -> Option<Attempt> {
		let inner = self.shared.inner.lock();

		if inner.disposed {
			return None;
		}

		let request = inner.request.clone()?;

		self.start(inner, request, true)
	}

	/// Changes the access level forwarded to the locator.
	///
	/// The current key, if any, is re-requested under the new level. Setting the level already
	/// in use is a no-op.
	pub fn set_access_level(&self, level: AccessLevel) -> Option<Attempt> {
		let mut inner = self.shared.inner.lock();

		if inner.disposed || inner.options.access_level == level {
			return None;
		}

		inner.options.access_level = level;

		let key = inner.request.as_ref()?.key.clone();
		let request = ResolveRequest::new(key, inner.options.clone());

		self.start(inner, request, false)
	}

	/// Returns the access level forwarded to the locator.
	pub fn access_level(&self) -> AccessLevel {
		self.shared.inner.lock().options.access_level
	}

	/// Returns the key currently requested.
	pub fn current_key(&self) -> Option<StorageKey> {
		self.shared.inner.lock().request.as_ref().map(|request| request.key.clone())
	}

	/// Derives the current view from the requested key and the stored resolution.
	pub fn observe(&self) -> ObservedState {
		self.shared.inner.lock().observe()
	}

	/// Returns a receiver notified every time the observed state changes.
	pub fn subscribe(&self) -> watch::Receiver<ObservedState> {
		self.shared.state.subscribe()
	}

	/// Abandons the resolver; outstanding attempts settle as superseded.
	///
	/// Publishes [`ObservedState::IDLE`] once and ignores every later request.
	pub fn dispose(&self) {
		let mut inner = self.shared.inner.lock();

		if inner.disposed {
			return;
		}

		inner.supersede();
		inner.disposed = true;
		inner.request = None;
		inner.resolution = None;
		self.shared.publish(&inner);
	}

	/// Returns `true` once [`dispose`](Self::dispose) ran.
	pub fn is_disposed(&self) -> bool {
		self.shared.inner.lock().disposed
	}

	fn start(
		&self,
		mut inner: MutexGuard<'_, Inner>,
		request: ResolveRequest,
		force: bool,
	) -> Option<Attempt> {
		if !force && inner.request.as_ref() == Some(&request) {
			return None;
		}

		inner.supersede();

		let generation = inner.generation;

		inner.request = Some(request.clone());
		inner.resolution = Some(Resolution::pending(request.clone()));
		self.shared.publish(&inner);

		drop(inner);
		obs::record_resolve_outcome(ResolveOutcome::Attempt);

		let span = ResolveSpan::new(&request);
		let call = self.locator.resolve(&request);
		let timeout = self.timeout;
		let shared = Arc::downgrade(&self.shared);
		let key = request.key.clone();
		let settle = async move {
			let result = match timeout {
				Some(limit) => tokio::time::timeout(limit, call)
					.await
					.unwrap_or_else(|_| Err(LocatorError::TimedOut { timeout: limit })),
				None => call.await,
			};

			match shared.upgrade() {
				Some(shared) => shared.commit(generation, request, result),
				None => AttemptOutcome::Superseded,
			}
		};

		Some(Attempt::new(key, generation, Arc::downgrade(&self.shared), span.instrument(settle)))
	}
}
impl Drop for KeyedResolver {
	fn drop(&mut self) {
		self.dispose();
	}
}
impl Debug for KeyedResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let inner = self.shared.inner.lock();

		f.debug_struct("KeyedResolver")
			.field("generation", &inner.generation)
			.field("request", &inner.request)
			.field("disposed", &inner.disposed)
			.field("timeout", &self.timeout)
			.finish()
	}
}

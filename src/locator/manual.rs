//! Hand-driven [`ResourceLocator`] whose calls settle only when released.
//!
//! Each call parks on a oneshot channel keyed by its storage key. Tests release calls in any
//! order with [`ManualLocator::succeed`] and [`ManualLocator::fail`], which makes arrival-order
//! races reproducible without timers.

// crates.io
use tokio::sync::oneshot::{self, Sender};
// self
use crate::{
	_prelude::*,
	key::StorageKey,
	locator::{LocatorError, LocatorFuture, ResolveRequest, ResourceLocator, SignedUrl},
};

type Parked = Sender<Result<SignedUrl, LocatorError>>;

#[derive(Debug, Default)]
struct ManualState {
	calls: Vec<ResolveRequest>,
	parked: HashMap<StorageKey, VecDeque<Parked>>,
}

/// Locator whose calls stay pending until the caller releases them.
#[derive(Clone, Debug, Default)]
pub struct ManualLocator(Arc<Mutex<ManualState>>);
impl ManualLocator {
	/// Settles the oldest pending call for `key` with `url`.
	///
	/// Returns `false` when no call for `key` is pending or its future was already dropped.
	pub fn succeed(&self, key: &str, url: Url) -> bool {
		self.release(key, Ok(SignedUrl::new(url)))
	}

	/// Settles the oldest pending call for `key` with `error`.
	///
	/// Returns `false` when no call for `key` is pending or its future was already dropped.
	pub fn fail(&self, key: &str, error: LocatorError) -> bool {
		self.release(key, Err(error))
	}

	/// Settles the oldest pending call for `key` with an arbitrary outcome.
	pub fn release(&self, key: &str, outcome: Result<SignedUrl, LocatorError>) -> bool {
		let parked = {
			let mut state = self.0.lock();
			let Some(queue) = state.parked.get_mut(key) else { return false };
			let parked = queue.pop_front();

			if queue.is_empty() {
				state.parked.remove(key);
			}

			parked
		};

		parked.is_some_and(|sender| sender.send(outcome).is_ok())
	}

	/// Returns how many calls for `key` are still waiting to be released.
	pub fn pending(&self, key: &str) -> usize {
		self.0.lock().parked.get(key).map_or(0, VecDeque::len)
	}

	/// Returns every request received so far, oldest first.
	pub fn calls(&self) -> Vec<ResolveRequest> {
		self.0.lock().calls.clone()
	}

	/// Returns how many requests were received.
	pub fn call_count(&self) -> usize {
		self.0.lock().calls.len()
	}
}
impl ResourceLocator for ManualLocator {
	fn resolve(&self, request: &ResolveRequest) -> LocatorFuture {
		let (sender, receiver) = oneshot::channel();

		{
			let mut state = self.0.lock();

			state.calls.push(request.clone());
			state.parked.entry(request.key.clone()).or_default().push_back(sender);
		}

		Box::pin(async move {
			receiver.await.unwrap_or_else(|_| {
				Err(LocatorError::other("Manual locator call was dropped before settling."))
			})
		})
	}
}

//! Futures that settle a single locator call into resolver state.

// std
use std::task::{Context, Poll};
// self
use crate::{_prelude::*, key::StorageKey, resolver::Shared};

/// Result of driving an [`Attempt`] to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
	/// The locator outcome was stored and published.
	Committed,
	/// A newer request, a cleared key, or disposal made the outcome irrelevant; it was dropped.
	Superseded,
}

/// Pending settlement of one locator call.
///
/// The locator has already been invoked when an attempt is returned. Await it or spawn it;
/// dropping it abandons the call without touching resolver state, leaving the request loading.
#[must_use = "attempts commit nothing unless they are awaited or spawned"]
pub struct Attempt {
	key: StorageKey,
	generation: u64,
	shared: Weak<Shared>,
	future: Pin<Box<dyn Future<Output = AttemptOutcome> + Send>>,
}
impl Attempt {
	pub(crate) fn new(
		key: StorageKey,
		generation: u64,
		shared: Weak<Shared>,
		future: impl 'static + Future<Output = AttemptOutcome> + Send,
	) -> Self {
		Self { key, generation, shared, future: Box::pin(future) }
	}

	/// Key this attempt resolves.
	pub fn key(&self) -> &StorageKey {
		&self.key
	}

	/// Generation captured when the attempt was issued.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns `true` while the attempt's outcome would still be committed.
	pub fn is_live(&self) -> bool {
		self.shared.upgrade().is_some_and(|shared| shared.is_current(self.generation))
	}

	/// Spawns the attempt onto the current Tokio runtime.
	#[cfg(feature = "rt")]
	pub fn spawn(self) -> tokio::task::JoinHandle<AttemptOutcome> {
		tokio::spawn(self)
	}
}
impl Future for Attempt {
	type Output = AttemptOutcome;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		self.future.as_mut().poll(cx)
	}
}
impl Debug for Attempt {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Attempt")
			.field("key", &self.key)
			.field("generation", &self.generation)
			.finish_non_exhaustive()
	}
}

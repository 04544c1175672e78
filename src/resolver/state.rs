//! Stored resolutions and the state derived from them.

// self
use crate::{
	_prelude::*,
	locator::{LocatorError, ResolveRequest, SignedUrl},
};

/// Settlement status of the latest locator call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// The locator has not settled yet.
	Pending,
	/// The locator produced a URL.
	Success(SignedUrl),
	/// The locator failed.
	Failure(LocatorError),
}

/// Outcome tagged with the request it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
	/// Request the outcome answers.
	pub request: ResolveRequest,
	/// Settlement status.
	pub outcome: Outcome,
}
impl Resolution {
	/// Creates a pending resolution for `request`.
	pub fn pending(request: ResolveRequest) -> Self {
		Self { request, outcome: Outcome::Pending }
	}

	/// Returns `true` when this resolution answers `request` and has settled.
	pub fn is_settled_for(&self, request: &ResolveRequest) -> bool {
		self.request == *request && !matches!(self.outcome, Outcome::Pending)
	}
}

/// Externally visible `(url, is_loading, error)` view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservedState {
	/// Resolved URL; `None` while loading, on failure, or without a key.
	pub url: Option<Url>,
	/// `true` until the locator settles for the current request.
	pub is_loading: bool,
	/// Failure of the current request, if it failed.
	pub error: Option<LocatorError>,
}
impl ObservedState {
	/// State reported when no key is requested.
	pub const IDLE: Self = Self { url: None, is_loading: false, error: None };
	/// State reported while the current request is in flight.
	pub const LOADING: Self = Self { url: None, is_loading: true, error: None };

	/// Derives the view from the current request and the stored resolution.
	///
	/// Resolutions that answer any other request are ignored, so a stale result can never be
	/// reported for the current key.
	pub fn derive(current: Option<&ResolveRequest>, stored: Option<&Resolution>) -> Self {
		let Some(current) = current else { return Self::IDLE };

		match stored {
			Some(resolution) if resolution.is_settled_for(current) => match &resolution.outcome {
				Outcome::Success(signed) =>
					Self { url: Some(signed.url.clone()), is_loading: false, error: None },
				Outcome::Failure(error) =>
					Self { url: None, is_loading: false, error: Some(error.clone()) },
				Outcome::Pending => Self::LOADING,
			},
			_ => Self::LOADING,
		}
	}
}

//! Optional observability helpers for resolve attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every attempt in a span named `storage_url.resolve` with the `key`
//!   and `access_level` fields.
//! - Enable `metrics` to increment the `storage_url_resolve_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.
//!
//! Superseded attempts are dropped silently and are neither traced as events nor counted.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolveOutcome {
	/// A locator call was issued.
	Attempt,
	/// A successful resolution was committed.
	Success,
	/// A failed resolution was committed.
	Failure,
}
impl ResolveOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResolveOutcome::Attempt => "attempt",
			ResolveOutcome::Success => "success",
			ResolveOutcome::Failure => "failure",
		}
	}
}
impl Display for ResolveOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

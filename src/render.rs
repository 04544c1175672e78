//! Render decisions for presentational consumers such as image components.

// self
use crate::{_prelude::*, resolver::ObservedState};

/// What a consumer should draw for an [`ObservedState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
	/// The URL is still resolving; draw a skeleton or the caller's fallback.
	Placeholder,
	/// Nothing to draw: no key, a failed resolution, or a missing URL.
	Nothing,
	/// Draw the resource from this URL.
	Image(Url),
}
impl Presentation {
	/// Maps a state onto a render decision.
	pub fn from_state(state: &ObservedState) -> Self {
		if state.is_loading {
			return Self::Placeholder;
		}
		if state.error.is_some() {
			return Self::Nothing;
		}

		match &state.url {
			Some(url) => Self::Image(url.clone()),
			None => Self::Nothing,
		}
	}

	/// Returns the URL to render, if any.
	pub fn url(&self) -> Option<&Url> {
		match self {
			Self::Image(url) => Some(url),
			_ => None,
		}
	}
}
impl From<&ObservedState> for Presentation {
	fn from(state: &ObservedState) -> Self {
		Self::from_state(state)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::locator::LocatorError;

	#[test]
	fn loading_wins_over_everything_else() {
		assert_eq!(Presentation::from_state(&ObservedState::LOADING), Presentation::Placeholder);
	}

	#[test]
	fn errors_and_missing_urls_render_nothing() {
		let failed = ObservedState {
			url: None,
			is_loading: false,
			error: Some(LocatorError::ExpiredCredentials),
		};

		assert_eq!(Presentation::from_state(&failed), Presentation::Nothing);
		assert_eq!(Presentation::from_state(&ObservedState::IDLE), Presentation::Nothing);
	}

	#[test]
	fn resolved_urls_render_images() {
		let url = Url::parse("https://cdn.example.com/x?sig=1").expect("URL fixture should parse.");
		let state = ObservedState { url: Some(url.clone()), is_loading: false, error: None };
		let presentation = Presentation::from(&state);

		assert_eq!(presentation.url(), Some(&url));
	}
}

//! Drives a resolver the way an image component would while its storage path changes.
//!
//! 1. Inject a [`ResourceLocator`] (here the hand-driven [`ManualLocator`]).
//! 2. Issue keys as the component's path changes and spawn the returned attempts.
//! 3. Re-render from [`Presentation`] every time the subscribed state changes.

// std
use std::{sync::Arc, time::Duration};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use storage_url::{
	key::StorageKey,
	locator::{LocatorError, ManualLocator},
	render::Presentation,
	resolver::KeyedResolver,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let locator = Arc::new(ManualLocator::default());
	let resolver = KeyedResolver::new(locator.clone());
	let mut states = resolver.subscribe();
	let renderer = tokio::spawn(async move {
		while states.changed().await.is_ok() {
			let presentation = Presentation::from_state(&states.borrow_and_update());

			match presentation {
				Presentation::Placeholder => println!("render: loading placeholder"),
				Presentation::Nothing => println!("render: nothing"),
				Presentation::Image(url) => println!("render: <img src=\"{url}\">"),
			}
		}
	});
	let hero = resolver.issue(Some(StorageKey::new("public/images/hero.jpg")?)).map(|a| a.spawn());
	let banner =
		resolver.issue(Some(StorageKey::new("public/images/banner.jpg")?)).map(|a| a.spawn());

	tokio::time::sleep(Duration::from_millis(10)).await;

	// The banner settles first; the hero's late answer is ignored.
	locator.succeed("public/images/banner.jpg", Url::parse("https://cdn.example.com/banner?sig=1")?);
	locator.succeed("public/images/hero.jpg", Url::parse("https://cdn.example.com/hero?sig=1")?);

	for handle in [hero, banner].into_iter().flatten() {
		println!("attempt settled: {:?}", handle.await?);
	}

	let missing = resolver.issue(Some(StorageKey::new("public/images/missing.jpg")?));

	locator.fail("public/images/missing.jpg", LocatorError::NotFound {
		key: "public/images/missing.jpg".into(),
	});

	if let Some(attempt) = missing {
		println!("attempt settled: {:?}", attempt.await);
	}

	drop(resolver);
	renderer.await?;

	Ok(())
}

// std
use std::sync::Arc;
// self
use storage_url::{
	key::StorageKey,
	locator::{LocatorError, ManualLocator},
	resolver::{AttemptOutcome, KeyedResolver, ObservedState},
	url::Url,
};

fn key(value: &str) -> StorageKey {
	StorageKey::new(value).expect("Key fixture should be valid.")
}

fn url(value: &str) -> Url {
	Url::parse(value).expect("URL fixture should parse.")
}

fn manual_resolver() -> (KeyedResolver, Arc<ManualLocator>) {
	let locator = Arc::new(ManualLocator::default());
	let resolver = KeyedResolver::new(locator.clone());

	(resolver, locator)
}

#[tokio::test]
async fn late_result_for_an_old_key_is_dropped() {
	let (resolver, locator) = manual_resolver();
	let first = resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.");
	let second = resolver.issue(Some(key("b.jpg"))).expect("Second key should start a call.");

	assert!(!first.is_live());
	assert!(second.is_live());
	assert!(locator.succeed("b.jpg", url("https://cdn.example.com/b")));
	assert_eq!(second.await, AttemptOutcome::Committed);
	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a")));
	assert_eq!(first.await, AttemptOutcome::Superseded);
	assert_eq!(
		resolver.observe().url.as_ref().map(Url::as_str),
		Some("https://cdn.example.com/b")
	);
}

#[tokio::test]
async fn early_result_for_an_old_key_never_shows() {
	let (resolver, locator) = manual_resolver();
	let mut states = resolver.subscribe();
	let first = resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.");
	let second = resolver.issue(Some(key("b.jpg"))).expect("Second key should start a call.");

	states.borrow_and_update();

	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a")));
	assert_eq!(first.await, AttemptOutcome::Superseded);
	assert_eq!(resolver.observe(), ObservedState::LOADING);
	assert!(!states.has_changed().expect("Resolver should keep the channel open."));
	assert!(locator.fail("b.jpg", LocatorError::ExpiredCredentials));
	assert_eq!(second.await, AttemptOutcome::Committed);
	assert_eq!(
		resolver.observe(),
		ObservedState {
			url: None,
			is_loading: false,
			error: Some(LocatorError::ExpiredCredentials),
		}
	);
}

#[tokio::test]
async fn returning_to_an_earlier_key_ignores_its_first_call() {
	let (resolver, locator) = manual_resolver();
	let stale = resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.");
	let _detour = resolver.issue(Some(key("b.jpg"))).expect("Second key should start a call.");
	let current = resolver.issue(Some(key("a.jpg"))).expect("Returning to a key should restart.");

	assert_eq!(locator.pending("a.jpg"), 2);
	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a?sig=old")));
	assert_eq!(stale.await, AttemptOutcome::Superseded);
	assert_eq!(resolver.observe(), ObservedState::LOADING);
	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a?sig=new")));
	assert_eq!(current.await, AttemptOutcome::Committed);
	assert_eq!(
		resolver.observe().url.as_ref().map(Url::as_str),
		Some("https://cdn.example.com/a?sig=new")
	);
}

#[tokio::test]
async fn clearing_the_key_supersedes_in_flight_call() {
	let (resolver, locator) = manual_resolver();
	let attempt = resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.");

	resolver.issue(None);

	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a")));
	assert_eq!(attempt.await, AttemptOutcome::Superseded);
	assert_eq!(resolver.observe(), ObservedState::IDLE);
}

#[tokio::test]
async fn disposal_discards_settlement_silently() {
	let (resolver, locator) = manual_resolver();
	let mut states = resolver.subscribe();
	let attempt = resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.");

	resolver.dispose();

	assert!(resolver.is_disposed());
	assert_eq!(*states.borrow_and_update(), ObservedState::IDLE);
	assert!(locator.fail("a.jpg", LocatorError::other("late failure")));
	assert_eq!(attempt.await, AttemptOutcome::Superseded);
	assert!(!states.has_changed().expect("Resolver should keep the channel open."));
	assert_eq!(resolver.observe(), ObservedState::IDLE);
	assert!(resolver.issue(Some(key("b.jpg"))).is_none());
	assert_eq!(locator.call_count(), 1);
}

#[tokio::test]
async fn dropped_resolver_releases_attempts() {
	let (resolver, locator) = manual_resolver();
	let handle =
		resolver.issue(Some(key("a.jpg"))).expect("First key should start a call.").spawn();

	drop(resolver);

	assert!(locator.succeed("a.jpg", url("https://cdn.example.com/a")));
	assert_eq!(handle.await.expect("Attempt task should not panic."), AttemptOutcome::Superseded);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn spawned_attempts_settling_out_of_order_keep_last_request() {
	let (resolver, locator) = manual_resolver();
	let keys = ["k0.jpg", "k1.jpg", "k2.jpg", "k3.jpg", "k4.jpg"];
	let handles = keys
		.iter()
		.map(|value| {
			resolver.issue(Some(key(value))).expect("Every new key should start a call.").spawn()
		})
		.collect::<Vec<_>>();

	for value in keys.iter().rev() {
		assert!(locator.succeed(value, url(&format!("https://cdn.example.com/{value}"))));
	}

	let mut outcomes = Vec::new();

	for handle in handles {
		outcomes.push(handle.await.expect("Attempt task should not panic."));
	}

	assert_eq!(outcomes.iter().filter(|o| **o == AttemptOutcome::Committed).count(), 1);
	assert_eq!(outcomes.last(), Some(&AttemptOutcome::Committed));
	assert_eq!(
		resolver.observe().url.as_ref().map(Url::as_str),
		Some("https://cdn.example.com/k4.jpg")
	);
}

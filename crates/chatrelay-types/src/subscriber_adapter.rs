//! Adapter for the set of devices subscribed to push notifications.
//!
//! A subscriber is identified by the opaque device token issued by the push
//! provider. Identifiers are never removed; they live as long as the backing
//! store does.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SubscriberAdapter: Debug + Send + Sync {
	/// Adds a subscriber if it is not registered yet.
	///
	/// Returns `true` if the identifier was newly added. Registering an
	/// identifier twice is not an error.
	async fn register(&self, id: &str) -> ClResult<bool>;

	/// Lists every registered subscriber in registration order
	async fn list(&self) -> ClResult<Vec<Box<str>>>;

	/// Lists every registered subscriber except `id`, in registration order
	async fn list_excluding(&self, id: &str) -> ClResult<Vec<Box<str>>>;
}

// vim: ts=4

//! In-memory subscriber adapter.
//!
//! Keeps subscriber identifiers for the lifetime of the process. Nothing is
//! written to disk, so every registration is lost on restart.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use parking_lot::RwLock;

use chatrelay_types::prelude::*;
use chatrelay_types::subscriber_adapter::SubscriberAdapter;

#[derive(Debug, Default)]
pub struct SubscriberAdapterMemory {
	// Registration order is kept so fan-out order is predictable
	subscribers: RwLock<Vec<Box<str>>>,
}

impl SubscriberAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.subscribers.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.subscribers.read().is_empty()
	}
}

#[async_trait]
impl SubscriberAdapter for SubscriberAdapterMemory {
	async fn register(&self, id: &str) -> ClResult<bool> {
		let mut subscribers = self.subscribers.write();
		if subscribers.iter().any(|s| s.as_ref() == id) {
			tracing::debug!(subscriber = %id, "Subscriber already registered");
			return Ok(false);
		}
		subscribers.push(id.into());
		tracing::debug!(subscriber = %id, total = subscribers.len(), "Subscriber registered");
		Ok(true)
	}

	async fn list(&self) -> ClResult<Vec<Box<str>>> {
		Ok(self.subscribers.read().clone())
	}

	async fn list_excluding(&self, id: &str) -> ClResult<Vec<Box<str>>> {
		Ok(self.subscribers.read().iter().filter(|s| s.as_ref() != id).cloned().collect())
	}
}

// vim: ts=4

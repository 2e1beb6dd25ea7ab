//! Shared types for the chat relay.
//!
//! Contains the error type used across all crates, the chat message model and
//! the adapter traits that let storage backends be swapped or mocked.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod subscriber_adapter;
pub mod types;

pub mod prelude {
	pub use crate::error::{ClResult, Error};
}

// vim: ts=4

//! Chat relay backend.
//!
//! # Features
//!
//! - Chat message endpoint
//!		- stamps every message with a unique id and the current time
//!		- notifies every other subscribed device through FCM
//! - Push subscription endpoint
//!		- in-memory by default, any `SubscriberAdapter` can be plugged in
//! - Fire-and-forget delivery
//!		- chat responses never wait for, or fail because of, notifications

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub use chatrelay_types::error;
pub use chatrelay_types::subscriber_adapter;
pub use chatrelay_types::types;

pub use chatrelay_push as push;

pub mod app;
pub mod chat;
pub mod extract;
pub mod notification;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder, AppState, FanOut};

// vim: ts=4

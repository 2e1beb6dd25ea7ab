//! Push notification delivery through Firebase Cloud Messaging (HTTP v1 API).
//!
//! # Components
//!
//! - [`credentials`] - service-account key loading and OAuth2 access tokens
//!   (JWT bearer grant, `firebase.messaging` scope)
//! - [`envelope`] - the provider-shaped message body
//! - [`send`] - one authenticated `messages:send` request per envelope
//! - [`dispatch`] - fire-and-forget queue that runs sends in the background
//!   and reports every outcome to an observer
//!
//! Access tokens are fetched for every send. Nothing is retried.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod credentials;
pub mod dispatch;
pub mod envelope;
pub mod http;
pub mod send;

mod prelude;

pub use credentials::{ServiceAccountKey, ServiceAccountTokenProvider, TokenProvider};
pub use dispatch::{DispatchObserver, LoggingObserver, PushDispatcher};
pub use envelope::{NotificationTemplate, PushEnvelope};
pub use send::{FcmClient, PushResult, PushTransport};

// vim: ts=4

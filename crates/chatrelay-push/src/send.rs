//! Push message delivery
//!
//! One authenticated POST to the provider's `messages:send` endpoint per
//! envelope. Each send fetches a new access token first.

use async_trait::async_trait;
use std::sync::Arc;

use crate::credentials::TokenProvider;
use crate::envelope::PushEnvelope;
use crate::http::{self, HttpsClient};

pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com";

/// Outcome of a single send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushResult {
	/// Accepted by the provider, with its response body
	Success(Box<str>),
	/// The provider answered with a non-success status
	Rejected { status: u16, body: Box<str> },
	/// No access token could be obtained
	AuthError(String),
	/// The request did not complete
	TransportError(String),
}

impl PushResult {
	pub fn is_success(&self) -> bool {
		matches!(self, PushResult::Success(_))
	}
}

/// Delivers a single envelope to the push provider
#[async_trait]
pub trait PushTransport: Send + Sync {
	async fn send(&self, envelope: &PushEnvelope) -> PushResult;
}

/// URL of the `messages:send` endpoint for a project
pub fn send_url(endpoint: &str, project_id: &str) -> String {
	format!("{}/v1/projects/{}/messages:send", endpoint.trim_end_matches('/'), project_id)
}

/// Firebase Cloud Messaging HTTP v1 client
pub struct FcmClient {
	client: HttpsClient,
	send_url: Box<str>,
	token_provider: Arc<dyn TokenProvider>,
}

impl FcmClient {
	pub fn new(
		client: HttpsClient,
		endpoint: &str,
		project_id: &str,
		token_provider: Arc<dyn TokenProvider>,
	) -> Self {
		FcmClient { client, send_url: send_url(endpoint, project_id).into(), token_provider }
	}

	pub fn send_url(&self) -> &str {
		&self.send_url
	}
}

#[async_trait]
impl PushTransport for FcmClient {
	async fn send(&self, envelope: &PushEnvelope) -> PushResult {
		let token = match self.token_provider.access_token().await {
			Ok(token) => token,
			Err(e) => return PushResult::AuthError(e.to_string()),
		};

		let body = match serde_json::to_vec(envelope) {
			Ok(body) => body,
			Err(e) => return PushResult::TransportError(format!("Payload serialization error: {}", e)),
		};

		match http::post(&self.client, &self.send_url, "application/json", Some(&token), body).await
		{
			Ok(response) if response.status.is_success() => PushResult::Success(response.body.into()),
			Ok(response) => {
				PushResult::Rejected { status: response.status.as_u16(), body: response.body.into() }
			}
			Err(e) => PushResult::TransportError(e),
		}
	}
}


// vim: ts=4

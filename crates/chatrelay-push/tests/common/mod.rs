//! Common test utilities for push delivery tests
//!
//! Provides a local stand-in for the push provider (token endpoint and
//! `messages:send`) plus stub transports and observers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use chatrelay_push::credentials::{ServiceAccountKey, TokenProvider};
use chatrelay_push::dispatch::DispatchObserver;
use chatrelay_push::envelope::PushEnvelope;
use chatrelay_push::send::{PushResult, PushTransport};
use chatrelay_types::error::{ClResult, Error};

pub const TEST_KEY: &str = include_str!("../fixtures/test_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_key.pub.pem");
pub const PROJECT_ID: &str = "test-project";
pub const ACCESS_TOKEN: &str = "test-access-token";

/// Requests seen by the fake provider
#[derive(Debug, Default)]
pub struct Recorded {
	/// Form bodies posted to the token endpoint
	pub token_requests: Vec<Vec<(String, String)>>,
	/// (Authorization header, JSON body) of every send
	pub sends: Vec<(Option<String>, Value)>,
}

#[derive(Clone)]
struct ProviderState {
	token_status: StatusCode,
	send_status: StatusCode,
	recorded: Arc<Mutex<Recorded>>,
}

pub struct FakeProvider {
	pub base_url: String,
	pub recorded: Arc<Mutex<Recorded>>,
}

impl FakeProvider {
	pub async fn start(token_status: StatusCode, send_status: StatusCode) -> Self {
		let recorded = Arc::new(Mutex::new(Recorded::default()));
		let state = ProviderState { token_status, send_status, recorded: recorded.clone() };

		let router = Router::new()
			.route("/token", post(token_handler))
			.route(&format!("/v1/projects/{}/messages:send", PROJECT_ID), post(send_handler))
			.with_state(state);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("Failed to bind fake provider");
		let addr = listener.local_addr().expect("No local address");
		tokio::spawn(async move {
			let _ = axum::serve(listener, router).await;
		});

		FakeProvider { base_url: format!("http://{}", addr), recorded }
	}

	pub fn token_uri(&self) -> String {
		format!("{}/token", self.base_url)
	}

	pub fn service_account_key(&self) -> ServiceAccountKey {
		ServiceAccountKey {
			client_email: "relay@test-project.iam.gserviceaccount.com".into(),
			private_key: TEST_KEY.into(),
			private_key_id: Some("key-1".into()),
			project_id: Some(PROJECT_ID.into()),
			token_uri: self.token_uri(),
		}
	}

	pub fn sends(&self) -> Vec<(Option<String>, Value)> {
		self.recorded.lock().expect("poisoned").sends.clone()
	}

	pub fn token_requests(&self) -> Vec<Vec<(String, String)>> {
		self.recorded.lock().expect("poisoned").token_requests.clone()
	}
}

async fn token_handler(State(state): State<ProviderState>, body: String) -> (StatusCode, Json<Value>) {
	let form: Vec<(String, String)> = url::form_urlencoded::parse(body.as_bytes())
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect();
	state.recorded.lock().expect("poisoned").token_requests.push(form);

	if state.token_status.is_success() {
		(
			state.token_status,
			Json(json!({ "access_token": ACCESS_TOKEN, "expires_in": 3599, "token_type": "Bearer" })),
		)
	} else {
		(state.token_status, Json(json!({ "error": "invalid_grant" })))
	}
}

async fn send_handler(
	State(state): State<ProviderState>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
	let auth = headers
		.get("authorization")
		.and_then(|v| v.to_str().ok())
		.map(ToString::to_string);
	let mut recorded = state.recorded.lock().expect("poisoned");
	recorded.sends.push((auth, body));

	if state.send_status.is_success() {
		let name = format!("projects/{}/messages/{}", PROJECT_ID, recorded.sends.len());
		(state.send_status, Json(json!({ "name": name })))
	} else {
		(state.send_status, Json(json!({ "error": { "status": "NOT_FOUND" } })))
	}
}

/// URL of a local port nothing listens on
pub async fn closed_url() -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("Failed to bind");
	let addr = listener.local_addr().expect("No local address");
	drop(listener);
	format!("http://{}", addr)
}

/// Token provider returning a fixed token or a fixed error
pub struct StaticTokenProvider(pub Option<&'static str>);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
	async fn access_token(&self) -> ClResult<Box<str>> {
		match self.0 {
			Some(token) => Ok(token.into()),
			None => Err(Error::AuthError("credential revoked".into())),
		}
	}
}

/// Transport that records envelopes and answers with a fixed result
pub struct StubTransport {
	pub result: PushResult,
	pub sent: Mutex<Vec<PushEnvelope>>,
}

impl StubTransport {
	pub fn new(result: PushResult) -> Arc<Self> {
		Arc::new(StubTransport { result, sent: Mutex::new(Vec::new()) })
	}
}

#[async_trait]
impl PushTransport for StubTransport {
	async fn send(&self, envelope: &PushEnvelope) -> PushResult {
		self.sent.lock().expect("poisoned").push(envelope.clone());
		self.result.clone()
	}
}

/// Observer forwarding every outcome to a channel
pub struct ChannelObserver {
	tx: flume::Sender<(String, PushResult)>,
}

impl ChannelObserver {
	pub fn new() -> (Arc<Self>, flume::Receiver<(String, PushResult)>) {
		let (tx, rx) = flume::unbounded();
		(Arc::new(ChannelObserver { tx }), rx)
	}
}

impl DispatchObserver for ChannelObserver {
	fn on_result(&self, recipient: &str, result: &PushResult) {
		let _ = self.tx.send((recipient.to_string(), result.clone()));
	}
}

/// Wait for `n` observed outcomes
pub async fn collect_results(
	rx: &flume::Receiver<(String, PushResult)>,
	n: usize,
) -> Vec<(String, PushResult)> {
	let mut results = Vec::with_capacity(n);
	for _ in 0..n {
		let item = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv_async())
			.await
			.expect("Timed out waiting for dispatch result")
			.expect("Observer channel closed");
		results.push(item);
	}
	results
}

// vim: ts=4

//! Shared helpers for the endpoint tests
//!
//! Every test builds its own app on an in-memory registry with a recording
//! push transport, then drives the router in-process with `oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{Request, StatusCode},
	Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use chatrelay::error::{ClResult, Error};
use chatrelay::push::{PushEnvelope, PushResult, PushTransport};
use chatrelay::subscriber_adapter::SubscriberAdapter;
use chatrelay::{routes, AppBuilder, FanOut};
use chatrelay_subscriber_adapter_memory::SubscriberAdapterMemory;

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

/// Push transport that hands every envelope to the test and answers with a
/// fixed result
#[derive(Debug)]
pub struct RecordingTransport {
	tx: flume::Sender<PushEnvelope>,
	result: PushResult,
}

impl RecordingTransport {
	pub fn new(result: PushResult) -> (Arc<Self>, flume::Receiver<PushEnvelope>) {
		let (tx, rx) = flume::unbounded();
		(Arc::new(RecordingTransport { tx, result }), rx)
	}
}

#[async_trait]
impl PushTransport for RecordingTransport {
	async fn send(&self, envelope: &PushEnvelope) -> PushResult {
		let _ = self.tx.send(envelope.clone());
		self.result.clone()
	}
}

/// Registry whose reads always fail
#[derive(Debug)]
pub struct FailingRegistry;

#[async_trait]
impl SubscriberAdapter for FailingRegistry {
	async fn register(&self, _id: &str) -> ClResult<bool> {
		Err(Error::Internal("registry unavailable".into()))
	}
	async fn list(&self) -> ClResult<Vec<Box<str>>> {
		Err(Error::Internal("registry unavailable".into()))
	}
	async fn list_excluding(&self, _id: &str) -> ClResult<Vec<Box<str>>> {
		Err(Error::Internal("registry unavailable".into()))
	}
}

pub struct TestApp {
	pub router: Router,
	pub registry: Arc<SubscriberAdapterMemory>,
	pub sent: flume::Receiver<PushEnvelope>,
}

/// App with `ids` already registered, in order
pub async fn test_app(fan_out: FanOut, ids: &[&str]) -> TestApp {
	test_app_with_result(fan_out, ids, PushResult::Success("projects/test/messages/1".into())).await
}

pub async fn test_app_with_result(fan_out: FanOut, ids: &[&str], result: PushResult) -> TestApp {
	setup_test_logging();
	let registry = Arc::new(SubscriberAdapterMemory::new());
	for id in ids {
		registry.register(id).await.unwrap();
	}
	let (transport, sent) = RecordingTransport::new(result);

	let mut builder = AppBuilder::new();
	builder.fan_out(fan_out).subscriber_adapter(registry.clone()).push_transport(transport);
	let app = builder.build().unwrap();

	TestApp { router: routes::init(app), registry, sent }
}

pub async fn request(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = res.into_body().collect().await.unwrap().to_bytes();
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, body)
}

pub async fn post_message(router: &Router, body: Value) -> (StatusCode, Value) {
	let req = Request::post("/api/chats/messages")
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.unwrap();
	request(router, req).await
}

pub async fn post_register(router: &Router, key: Option<&str>) -> (StatusCode, Value) {
	let uri = match key {
		Some(key) => format!("/api/notifications/register?firebase-key={}", key),
		None => "/api/notifications/register".to_string(),
	};
	request(router, Request::post(uri).body(Body::empty()).unwrap()).await
}

/// Wait for `n` dispatched envelopes, then make sure no more follow
pub async fn collect_sent(rx: &flume::Receiver<PushEnvelope>, n: usize) -> Vec<PushEnvelope> {
	let mut sent = Vec::with_capacity(n);
	for _ in 0..n {
		let envelope = tokio::time::timeout(Duration::from_secs(5), rx.recv_async())
			.await
			.expect("Timed out waiting for a dispatch")
			.unwrap();
		sent.push(envelope);
	}
	let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv_async()).await;
	assert!(extra.is_err(), "unexpected extra dispatch: {:?}", extra);
	sent
}

// vim: ts=4

//! Fire-and-forget push dispatch
//!
//! Envelopes are queued and sent from a background task, each send running
//! as its own task. Callers never wait for delivery and never see its
//! errors; every outcome is reported to a [`DispatchObserver`] instead.

use flume::{Receiver, Sender};
use std::sync::Arc;

use crate::envelope::PushEnvelope;
use crate::prelude::*;
use crate::send::{PushResult, PushTransport};

/// Receives the outcome of every dispatched envelope
pub trait DispatchObserver: Send + Sync {
	fn on_result(&self, recipient: &str, result: &PushResult);
}

/// Default observer: writes every outcome to the log
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl DispatchObserver for LoggingObserver {
	fn on_result(&self, recipient: &str, result: &PushResult) {
		match result {
			PushResult::Success(response) => {
				info!(recipient = %recipient, response = %response, "Push message sent");
			}
			PushResult::Rejected { status, body } => {
				warn!(
					recipient = %recipient,
					status = %status,
					response = %body,
					"Push message rejected by provider"
				);
			}
			PushResult::AuthError(e) => {
				error!(recipient = %recipient, error = %e, "Unable to obtain push access token");
			}
			PushResult::TransportError(e) => {
				error!(recipient = %recipient, error = %e, "Unable to send push message");
			}
		}
	}
}

pub struct PushDispatcher {
	tx: Sender<PushEnvelope>,
}

impl PushDispatcher {
	/// Spawn the dispatch loop on the current tokio runtime.
	///
	/// The loop ends when the dispatcher is dropped; sends already started
	/// run to completion.
	pub fn start(
		transport: Arc<dyn PushTransport>,
		observer: Arc<dyn DispatchObserver>,
	) -> ClResult<Self> {
		let handle = tokio::runtime::Handle::try_current().map_err(|e| {
			error!("FATAL: Push dispatcher needs a tokio runtime: {}", e);
			Error::Internal("Push dispatcher started outside a tokio runtime".to_string())
		})?;
		let (tx, rx) = flume::unbounded();
		handle.spawn(dispatch_loop(rx, transport, observer));
		Ok(Self { tx })
	}

	/// Queue an envelope for sending. Never blocks and never fails.
	pub fn dispatch(&self, envelope: PushEnvelope) {
		let recipient: Box<str> = envelope.recipient().into();
		if self.tx.send(envelope).is_err() {
			error!(recipient = %recipient, "Push dispatcher is not running, message dropped");
		} else {
			debug!(recipient = %recipient, "Push message queued");
		}
	}
}

async fn dispatch_loop(
	rx: Receiver<PushEnvelope>,
	transport: Arc<dyn PushTransport>,
	observer: Arc<dyn DispatchObserver>,
) {
	while let Ok(envelope) = rx.recv_async().await {
		let transport = transport.clone();
		let observer = observer.clone();
		tokio::spawn(async move {
			let result = transport.send(&envelope).await;
			observer.on_result(envelope.recipient(), &result);
		});
	}
	debug!("Push dispatcher stopped");
}


// vim: ts=4

//! Chat message HTTP handler

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::app::FanOut;
use crate::extract::JsonBody;
use crate::prelude::*;
use chatrelay_push::PushEnvelope;
use chatrelay_types::types::ChatMessage;

/// Request body of `POST /api/chats/messages`
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
	pub message: Option<String>,
	/// Subscriber identifier of the sending device, excluded from the fan-out
	#[serde(rename = "firebaseToken", default)]
	pub firebase_token: Option<String>,
}

/// Addresses for the notifications of one message.
///
/// Always yields one entry per recipient. In `FirstRecipient` mode every
/// entry is the first recipient.
pub fn fan_out_targets(mode: FanOut, recipients: &[Box<str>]) -> Vec<&str> {
	match mode {
		FanOut::EachRecipient => recipients.iter().map(AsRef::as_ref).collect(),
		FanOut::FirstRecipient => match recipients.first() {
			Some(first) => vec![first.as_ref(); recipients.len()],
			None => Vec::new(),
		},
	}
}

fn build_envelope(app: &App, target: &str, msg: &ChatMessage) -> PushEnvelope {
	app.opts
		.notification
		.envelope(target)
		.with_data("id", &*msg.id)
		.with_data("from", &*msg.from)
		.with_data("message", &*msg.message)
}

/// POST /api/chats/messages
pub async fn post_message(
	State(app): State<App>,
	JsonBody(req): JsonBody<PostMessageRequest>,
) -> ClResult<Json<ChatMessage>> {
	let Some(message) = req.message else {
		return Err(Error::ValidationError("message is required".into()));
	};
	// Registered ids are stored trimmed, so the sender must match the same way
	let from = req.firebase_token.as_deref().map(str::trim).unwrap_or_default();
	let msg = ChatMessage::new(from, message);

	let recipients = match app.subscriber_adapter.list_excluding(&msg.from).await {
		Ok(recipients) => recipients,
		Err(e) => {
			// The message is still echoed, only the notifications are lost
			warn!(msg_id = %msg.id, error = %e, "Failed to list subscribers");
			Vec::new()
		}
	};

	let targets = fan_out_targets(app.opts.fan_out, &recipients);
	info!(
		msg_id = %msg.id,
		from = %msg.from,
		recipients = targets.len(),
		"Chat message received"
	);
	for target in targets {
		app.dispatcher.dispatch(build_envelope(&app, target, &msg));
	}

	Ok(Json(msg))
}


// vim: ts=4

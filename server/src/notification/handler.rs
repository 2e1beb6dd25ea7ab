//! Push subscription HTTP handler

use axum::{
	extract::{Query, State},
	Json,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct RegisterQuery {
	#[serde(rename = "firebase-key")]
	pub firebase_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
	pub message: &'static str,
}

/// POST /api/notifications/register?firebase-key=<id>
///
/// Subscribes a device. Registering an already known device is a no-op with
/// the same response.
pub async fn post_register(
	State(app): State<App>,
	Query(query): Query<RegisterQuery>,
) -> ClResult<Json<RegisterResponse>> {
	let id = query.firebase_key.as_deref().map(str::trim).unwrap_or_default();
	if id.is_empty() {
		return Err(Error::ValidationError("firebase-key is required".into()));
	}

	let added = app.subscriber_adapter.register(id).await.map_err(|e| {
		error!(subscriber = %id, error = %e, "Failed to register push subscription");
		e
	})?;
	info!(subscriber = %id, added, "Push subscription registered");

	Ok(Json(RegisterResponse { message: "ok" }))
}

// vim: ts=4

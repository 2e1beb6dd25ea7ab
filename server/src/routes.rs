use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::App;
use crate::{chat, notification};

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/chats/messages", post(chat::handler::post_message))
		.route("/api/notifications/register", post(notification::handler::post_register))
		.layer(TraceLayer::new_for_http())
		// Browser clients send credentials from arbitrary origins
		.layer(CorsLayer::very_permissive())
		.with_state(app)
}

// vim: ts=4

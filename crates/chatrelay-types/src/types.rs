//! Common types used throughout the chat relay.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format of `ChatMessage::date` (`YYYY-MM-DD HH:mm:ss`, local time)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way chat clients expect it
pub fn format_date(date: &DateTime<Local>) -> String {
	date.format(DATE_FORMAT).to_string()
}

// ChatMessage //
//*************//
/// A chat message as echoed back to the sender.
///
/// Created once per request to the message endpoint and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub id: Box<str>,
	/// Subscriber identifier of the sending device
	pub from: Box<str>,
	pub message: Box<str>,
	pub date: Box<str>,
	#[serde(default)]
	pub attachments: Vec<Attachment>,
}

impl ChatMessage {
	/// Stamp a new message with a fresh id and the current local time
	pub fn new(from: impl Into<Box<str>>, message: impl Into<Box<str>>) -> Self {
		Self::with_date(from, message, &Local::now())
	}

	pub fn with_date(
		from: impl Into<Box<str>>,
		message: impl Into<Box<str>>,
		date: &DateTime<Local>,
	) -> Self {
		ChatMessage {
			id: uuid::Uuid::new_v4().to_string().into(),
			from: from.into(),
			message: message.into(),
			date: format_date(date).into(),
			attachments: Vec::new(),
		}
	}
}

/// Attachment reference. Messages are currently created without attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
	pub url: Box<str>,
	#[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
	pub content_type: Option<Box<str>>,
}


// vim: ts=4

//! Push message envelope for the FCM HTTP v1 `messages:send` endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body of `messages:send`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEnvelope {
	pub message: PushMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
	/// Registration token of the target device
	pub token: Box<str>,
	/// Custom key-value payload. The provider only accepts string values.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub data: BTreeMap<String, String>,
	pub notification: Notification,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub webpush: Option<WebpushConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub android: Option<AndroidConfig>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub apns: Option<ApnsConfig>,
}

/// Display notification shown by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
	pub title: Box<str>,
	pub body: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpushConfig {
	pub fcm_options: WebpushFcmOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpushFcmOptions {
	/// Link opened when the notification is clicked
	pub link: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
	pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidNotification {
	pub click_action: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnsConfig {
	pub headers: BTreeMap<String, String>,
	pub payload: serde_json::Value,
}

impl PushEnvelope {
	pub fn new(token: impl Into<Box<str>>, notification: Notification) -> Self {
		PushEnvelope {
			message: PushMessage {
				token: token.into(),
				data: BTreeMap::new(),
				notification,
				webpush: None,
				android: None,
				apns: None,
			},
		}
	}

	/// The device this envelope is addressed to
	pub fn recipient(&self) -> &str {
		&self.message.token
	}

	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.message.data.insert(key.into(), value.into());
		self
	}

	pub fn with_link(mut self, link: impl Into<Box<str>>) -> Self {
		self.message.webpush =
			Some(WebpushConfig { fcm_options: WebpushFcmOptions { link: link.into() } });
		self
	}

	/// Add Android and iOS specific customizations: the Android notification
	/// opens the main activity, iOS gets a badge and immediate delivery.
	pub fn with_platform_overrides(mut self) -> Self {
		self.message.android = Some(AndroidConfig {
			notification: AndroidNotification { click_action: "android.intent.action.MAIN".into() },
		});
		self.message.apns = Some(ApnsConfig {
			headers: BTreeMap::from([("apns-priority".to_string(), "10".to_string())]),
			payload: serde_json::json!({ "aps": { "badge": 1 } }),
		});
		self
	}
}

// NotificationTemplate //
//**********************//
/// Notification content shared by every envelope the relay sends
#[derive(Debug, Clone)]
pub struct NotificationTemplate {
	pub title: Box<str>,
	pub body: Box<str>,
	/// Web push click link; omitted from the envelope when `None`
	pub link: Option<Box<str>>,
	/// Value of the `type` data field
	pub data_type: Box<str>,
	/// Add Android/APNs override blocks
	pub platform_overrides: bool,
}

impl Default for NotificationTemplate {
	fn default() -> Self {
		NotificationTemplate {
			title: "ROL 1 - Message chat".into(),
			body: "You have received a new message in the chat of ROL 1".into(),
			link: Some("#/rol-open/1".into()),
			data_type: "CLAIM_UPDATE".into(),
			platform_overrides: false,
		}
	}
}

impl NotificationTemplate {
	/// Build an envelope for `token` from the template
	pub fn envelope(&self, token: impl Into<Box<str>>) -> PushEnvelope {
		let notification = Notification { title: self.title.clone(), body: self.body.clone() };
		let mut envelope =
			PushEnvelope::new(token, notification).with_data("type", &*self.data_type);
		if let Some(link) = &self.link {
			envelope = envelope.with_link(link.clone());
		}
		if self.platform_overrides {
			envelope = envelope.with_platform_overrides();
		}
		envelope
	}
}


// vim: ts=4

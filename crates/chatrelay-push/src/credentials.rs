//! Service-account credentials and access tokens
//!
//! The push provider accepts short-lived OAuth2 bearer tokens. They are
//! obtained with the JWT bearer grant (RFC 7523): an RS256 assertion signed
//! with the service-account private key is exchanged at the key's
//! `token_uri` for an access token scoped to `firebase.messaging`.

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::http::{self, HttpsClient};
use crate::prelude::*;

pub const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Maximum lifetime the token endpoint accepts for an assertion
const ASSERTION_LIFETIME_SECS: u64 = 3600;

fn default_token_uri() -> String {
	DEFAULT_TOKEN_URI.to_string()
}

/// Fields of the provider-issued service-account JSON file that are used
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
	pub client_email: String,
	pub private_key: String,
	#[serde(default)]
	pub private_key_id: Option<String>,
	#[serde(default)]
	pub project_id: Option<String>,
	#[serde(default = "default_token_uri")]
	pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ServiceAccountKey")
			.field("client_email", &self.client_email)
			.field("private_key", &"<redacted>")
			.field("private_key_id", &self.private_key_id)
			.field("project_id", &self.project_id)
			.field("token_uri", &self.token_uri)
			.finish()
	}
}

impl ServiceAccountKey {
	pub fn from_json(json: &str) -> ClResult<Self> {
		serde_json::from_str(json)
			.map_err(|e| Error::ConfigError(format!("Invalid service account key: {}", e)))
	}

	/// Read the key file supplied by the provider
	pub async fn load(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		let json = tokio::fs::read_to_string(path).await.map_err(|e| {
			Error::ConfigError(format!("Cannot read service account key {}: {}", path.display(), e))
		})?;
		Self::from_json(&json)
	}
}

/// Source of bearer tokens for the push provider
#[async_trait]
pub trait TokenProvider: Send + Sync {
	/// Obtain a bearer token. Failures are reported as `Error::AuthError`.
	async fn access_token(&self) -> ClResult<Box<str>>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
	pub iss: String,
	pub scope: String,
	pub aud: String,
	pub iat: u64,
	pub exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	expires_in: Option<u64>,
}

/// Exchanges a service-account key for access tokens.
///
/// Every call performs a fresh exchange; tokens are not cached.
pub struct ServiceAccountTokenProvider {
	client_email: String,
	key_id: Option<String>,
	token_uri: String,
	encoding_key: EncodingKey,
	client: HttpsClient,
}

impl ServiceAccountTokenProvider {
	pub fn new(key: &ServiceAccountKey, client: HttpsClient) -> ClResult<Self> {
		let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
			.map_err(|e| Error::ConfigError(format!("Invalid service account private key: {}", e)))?;

		Ok(Self {
			client_email: key.client_email.clone(),
			key_id: key.private_key_id.clone(),
			token_uri: key.token_uri.clone(),
			encoding_key,
			client,
		})
	}

	/// Build the signed assertion sent to the token endpoint
	pub fn create_assertion(&self, now: u64) -> ClResult<String> {
		let claims = AssertionClaims {
			iss: self.client_email.clone(),
			scope: MESSAGING_SCOPE.to_string(),
			aud: self.token_uri.clone(),
			iat: now,
			exp: now + ASSERTION_LIFETIME_SECS,
		};
		let mut header = Header::new(Algorithm::RS256);
		header.kid.clone_from(&self.key_id);

		encode(&header, &claims, &self.encoding_key)
			.map_err(|e| Error::AuthError(format!("JWT encoding failed: {}", e)))
	}
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
	async fn access_token(&self) -> ClResult<Box<str>> {
		let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO).as_secs();
		let assertion = self.create_assertion(now)?;

		let body = url::form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", GRANT_TYPE)
			.append_pair("assertion", &assertion)
			.finish();

		let response = http::post(
			&self.client,
			&self.token_uri,
			"application/x-www-form-urlencoded",
			None,
			body.into_bytes(),
		)
		.await
		.map_err(Error::AuthError)?;

		if !response.status.is_success() {
			return Err(Error::AuthError(format!(
				"Token endpoint returned HTTP {}: {}",
				response.status, response.body
			)));
		}

		let token: TokenResponse = serde_json::from_str(&response.body)
			.map_err(|e| Error::AuthError(format!("Invalid token response: {}", e)))?;
		debug!(
			client_email = %self.client_email,
			expires_in = ?token.expires_in,
			"Access token issued"
		);

		Ok(token.access_token.into())
	}
}


// vim: ts=4

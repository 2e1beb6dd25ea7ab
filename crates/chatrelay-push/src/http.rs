//! Shared HTTPS client for calls to the push provider

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, StatusCode};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::prelude::*;

pub type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Response status and body, read to the end
#[derive(Debug)]
pub struct HttpResponse {
	pub status: StatusCode,
	pub body: String,
}

/// Create a client speaking HTTP/1.1 and HTTP/2 over TLS.
///
/// Plain `http://` URLs are accepted as well so a local stand-in for the
/// provider can be used.
pub fn new_client() -> HttpsClient {
	let builder = match HttpsConnectorBuilder::new().with_native_roots() {
		Ok(builder) => builder,
		Err(e) => {
			warn!(error = %e, "No native root certificates, falling back to bundled roots");
			HttpsConnectorBuilder::new().with_webpki_roots()
		}
	};
	let connector = builder.https_or_http().enable_http1().enable_http2().build();

	Client::builder(TokioExecutor::new()).build(connector)
}

/// POST `body` to `uri`, optionally with a bearer token.
///
/// Only transport level failures are errors; any HTTP status is returned.
pub async fn post(
	client: &HttpsClient,
	uri: &str,
	content_type: &str,
	bearer: Option<&str>,
	body: Vec<u8>,
) -> Result<HttpResponse, String> {
	let mut builder =
		hyper::Request::builder().method(Method::POST).uri(uri).header(CONTENT_TYPE, content_type);
	if let Some(token) = bearer {
		builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
	}
	let request = builder
		.body(Full::new(Bytes::from(body)))
		.map_err(|e| format!("Request build error: {}", e))?;

	let response = client.request(request).await.map_err(|e| format!("Network error: {}", e))?;
	let status = response.status();
	let bytes = response
		.into_body()
		.collect()
		.await
		.map_err(|e| format!("Response read error: {}", e))?
		.to_bytes();

	Ok(HttpResponse { status, body: String::from_utf8_lossy(&bytes).into_owned() })
}

// vim: ts=4

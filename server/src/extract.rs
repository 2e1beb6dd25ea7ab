use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::prelude::*;

// JsonBody //
//**********//
/// `Json` extractor whose failures use the relay's error body.
///
/// A missing content type, malformed JSON or a field of the wrong type is a
/// `ValidationError` (400) instead of axum's plain-text 415/422.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		match Json::<T>::from_request(req, state).await {
			Ok(Json(value)) => Ok(JsonBody(value)),
			Err(rejection) => {
				debug!(status = %rejection.status(), "Rejected request body");
				Err(Error::ValidationError(rejection.body_text()))
			}
		}
	}
}

// vim: ts=4

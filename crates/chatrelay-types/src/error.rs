//! Error type shared by every chat relay crate

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	/// Missing or malformed request field
	ValidationError(String),
	/// Credential exchange with the push provider failed
	AuthError(String),
	/// Outbound network call failed
	NetworkError(String),
	ConfigError(String),
	Parse,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Stable machine-readable code reported in error responses
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOT-FOUND",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::AuthError(_) => "E-AUTH",
			Error::NetworkError(_) => "E-NETWORK",
			Error::ConfigError(_) => "E-CONFIG",
			Error::Parse => "E-PARSE",
			Error::Internal(_) | Error::Io(_) => "E-INTERNAL",
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::AuthError(msg) => write!(f, "auth error: {}", msg),
			Error::NetworkError(msg) => write!(f, "network error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Parse => write!(f, "parse error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		use axum::http::StatusCode;

		let status = match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ValidationError(_) | Error::Parse => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};
		// Internal details are not sent to the client
		let message = match &self {
			Error::ValidationError(msg) => msg.clone(),
			Error::NotFound => "Not found".to_string(),
			Error::Parse => "Malformed request".to_string(),
			_ => "Internal server error".to_string(),
		};
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": message,
			}
		});
		(status, axum::Json(body)).into_response()
	}
}


// vim: ts=4

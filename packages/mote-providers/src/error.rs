use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Provider failures split by retryability: transient ones may succeed on a
/// later attempt, permanent ones will not.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Transient provider failure: {message}")]
	Transient { message: String },
	#[error("Permanent provider failure: {message}")]
	Permanent { message: String },
}
impl Error {
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Transient { .. })
	}

	pub(crate) fn transient(message: impl Into<String>) -> Self {
		Self::Transient { message: message.into() }
	}

	pub(crate) fn permanent(message: impl Into<String>) -> Self {
		Self::Permanent { message: message.into() }
	}
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if let Some(status) = err.status() {
			return classify_status(status, err.to_string());
		}
		if err.is_timeout() || err.is_connect() {
			return Self::transient(err.to_string());
		}

		Self::permanent(err.to_string())
	}
}

pub(crate) fn classify_status(status: StatusCode, message: String) -> Error {
	if status == StatusCode::REQUEST_TIMEOUT
		|| status == StatusCode::TOO_MANY_REQUESTS
		|| status.is_server_error()
	{
		Error::transient(message)
	} else {
		Error::permanent(message)
	}
}

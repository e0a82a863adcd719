mod error;
pub mod mailer;
pub mod summarizer;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub(crate) fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(
		AUTHORIZATION,
		format!("Bearer {api_key}")
			.parse()
			.map_err(|_| Error::permanent("API key is not a valid header value."))?,
	);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::permanent("Default header values must be strings."));
		};
		let name = HeaderName::from_bytes(key.as_bytes())
			.map_err(|err| Error::permanent(format!("Invalid default header name {key:?}: {err}.")))?;

		headers.insert(
			name,
			raw.parse()
				.map_err(|_| Error::permanent(format!("Invalid default header value for {key:?}.")))?,
		);
	}

	Ok(headers)
}

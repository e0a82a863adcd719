use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, error::classify_status};

const SYSTEM_PROMPT: &str = "You are an expert note summarizer. Notes are delimited by \
[Title] headings; use each title as context for its summary.";

/// Summarize `input` through the configured chat-completions endpoint.
pub async fn summarize(cfg: &mote_config::Summarizer, input: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"messages": [
			{ "role": "system", "content": system_prompt(cfg) },
			{ "role": "user", "content": input },
		],
		"max_completion_tokens": cfg.max_output_tokens,
	});
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let detail = res.text().await.unwrap_or_default();

		return Err(classify_status(
			status,
			format!("Summarizer returned {status}: {detail}"),
		));
	}

	let json: Value = res.json().await?;

	parse_summary_response(json)
}

fn system_prompt(cfg: &mote_config::Summarizer) -> String {
	match cfg.additional_prompt.as_deref() {
		Some(extra) => format!("{SYSTEM_PROMPT} {extra}"),
		None => SYSTEM_PROMPT.to_string(),
	}
}

fn parse_summary_response(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|value| value.as_array())
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(|content| content.as_str())
		.map(str::to_string)
		.ok_or_else(|| Error::permanent("Summarizer response is missing message content."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "A short summary." } }
			]
		});

		assert_eq!(parse_summary_response(json).expect("parse failed"), "A short summary.");
	}

	#[test]
	fn missing_content_is_permanent() {
		let json = serde_json::json!({ "choices": [] });
		let err = parse_summary_response(json).expect_err("Expected a parse error.");

		assert!(!err.is_transient());
	}
}

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

static TEMPLATE_SYNTAX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("Template pattern must compile."));

/// Split a note into its YAML front-matter mapping and body text.
///
/// Template placeholders (`{{...}}`) are masked before parsing so templated
/// notes still yield usable front matter. Malformed YAML is tolerated: the
/// mapping is `None` and the body after the closing marker is kept.
pub fn split(content: &str) -> (Option<Mapping>, &str) {
	let Some(rest) = strip_open_marker(content) else {
		return (None, content);
	};
	let Some((yaml_end, body_start)) = closing_marker(rest) else {
		return (None, content);
	};
	let body = &rest[body_start..];
	let masked = TEMPLATE_SYNTAX.replace_all(&rest[..yaml_end], "TEMPLATE_VALUE");

	match serde_yaml::from_str::<Value>(&masked) {
		Ok(Value::Mapping(mapping)) => (Some(mapping), body),
		_ => (None, body),
	}
}

/// Front-matter `tags`, accepting both a single string and a list.
pub fn tags(mapping: &Mapping) -> Vec<String> {
	match mapping.get("tags") {
		Some(Value::String(tag)) => vec![tag.clone()],
		Some(Value::Sequence(sequence)) =>
			sequence.iter().filter_map(|value| value.as_str().map(str::to_string)).collect(),
		_ => Vec::new(),
	}
}

fn strip_open_marker(content: &str) -> Option<&str> {
	content.strip_prefix("---\n").or_else(|| content.strip_prefix("---\r\n"))
}

fn closing_marker(rest: &str) -> Option<(usize, usize)> {
	rest.find("\n---\n")
		.map(|idx| (idx, idx + 5))
		.or_else(|| rest.find("\n---\r\n").map(|idx| (idx, idx + 6)))
		.or_else(|| rest.ends_with("\n---").then(|| (rest.len() - 4, rest.len())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_mapping_and_body() {
		let note = "---\ntags:\n  - digest\n---\nbody text";
		let (mapping, body) = split(note);

		assert_eq!(tags(&mapping.expect("Expected front matter.")), vec!["digest".to_string()]);
		assert_eq!(body, "body text");
	}

	#[test]
	fn content_without_marker_is_all_body() {
		let (mapping, body) = split("no front matter here");

		assert!(mapping.is_none());
		assert_eq!(body, "no front matter here");
	}

	#[test]
	fn unterminated_marker_is_all_body() {
		let note = "---\ntags: digest\nno closing marker";
		let (mapping, body) = split(note);

		assert!(mapping.is_none());
		assert_eq!(body, note);
	}

	#[test]
	fn malformed_yaml_keeps_body() {
		let note = "---\n: [broken\n---\nbody";
		let (mapping, body) = split(note);

		assert!(mapping.is_none());
		assert_eq!(body, "body");
	}

	#[test]
	fn template_placeholders_are_masked() {
		let note = "---\ntitle: {{date}}\ntags: digest\n---\nbody";
		let (mapping, body) = split(note);

		assert_eq!(tags(&mapping.expect("Expected front matter.")), vec!["digest".to_string()]);
		assert_eq!(body, "body");
	}

	#[test]
	fn tags_accept_string_form() {
		let (mapping, _) = split("---\ntags: digest\n---\nbody");

		assert_eq!(tags(&mapping.expect("Expected front matter.")), vec!["digest".to_string()]);
	}

	#[test]
	fn missing_or_null_tags_are_empty() {
		let (mapping, _) = split("---\ntitle: note\n---\nbody");

		assert!(tags(&mapping.expect("Expected front matter.")).is_empty());

		let (mapping, _) = split("---\ntags:\n---\nbody");

		assert!(tags(&mapping.expect("Expected front matter.")).is_empty());
	}
}

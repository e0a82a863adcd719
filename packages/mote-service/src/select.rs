use std::path::PathBuf;

use time::OffsetDateTime;

use mote_domain::{TimeWindow, frontmatter, tag};

use crate::Result;

#[derive(Clone, Debug)]
pub struct SelectedNote {
	pub path: PathBuf,
	pub title: String,
	/// Cleaned eligible text: the whole body for front-matter-tagged notes,
	/// the tagged list blocks otherwise.
	pub text: String,
	pub modified: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct SelectionResult {
	pub notes: Vec<SelectedNote>,
	pub window: TimeWindow,
}

/// Scan the vault, keep notes modified inside the window whose content
/// carries the target tag, and order them by `(modified, path)` so repeated
/// runs over identical inputs produce identical batches.
pub fn select_notes(vault: &mote_config::Vault, window: TimeWindow) -> Result<SelectionResult> {
	let files = mote_vault::scan(&vault.root, &vault.extension)?;
	let mut notes = Vec::new();

	for file in files {
		// Metadata check first; content is only read for window candidates.
		if !window.contains(file.modified) {
			continue;
		}

		let content = match mote_vault::read(&file.path) {
			Ok(content) => content,
			Err(err) => {
				tracing::warn!(error = %err, path = %file.path.display(), "Skipping unreadable note.");

				continue;
			},
		};
		let Some(text) = eligible_text(&content, &vault.target_tag) else {
			continue;
		};
		let title = file
			.path
			.file_stem()
			.map(|stem| stem.to_string_lossy().into_owned())
			.unwrap_or_default();

		notes.push(SelectedNote { path: file.path, title, text, modified: file.modified });
	}

	notes.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));

	Ok(SelectionResult { notes, window })
}

/// A note is eligible when the target tag sits in its front-matter tags (the
/// whole body qualifies) or on a list block in its body (those blocks only).
fn eligible_text(content: &str, target_tag: &str) -> Option<String> {
	let (mapping, body) = frontmatter::split(content);
	let front_tags = mapping.map(|mapping| frontmatter::tags(&mapping)).unwrap_or_default();
	let raw = if front_tags.iter().any(|front_tag| front_tag == target_tag) {
		body.to_string()
	} else {
		tag::extract_tagged_blocks(body, target_tag)?
	};
	let cleaned = tag::clean(&raw);

	if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn front_matter_tag_takes_the_whole_body() {
		let content = "---\ntags:\n  - digest\n---\nEntire body here.";

		assert_eq!(eligible_text(content, "digest"), Some("Entire body here.".to_string()));
	}

	#[test]
	fn body_tag_takes_only_tagged_blocks() {
		let content = "- keep me #digest\n- drop me";
		let text = eligible_text(content, "digest").expect("Expected eligible text.");

		assert!(text.contains("keep me"));
		assert!(!text.contains("drop me"));
	}

	#[test]
	fn tag_only_notes_are_not_eligible() {
		// Cleaning strips the tag; nothing is left to summarize.
		let content = "---\ntags: digest\n---\n#digest";

		assert_eq!(eligible_text(content, "digest"), None);
	}

	#[test]
	fn untagged_notes_are_not_eligible() {
		assert_eq!(eligible_text("plain body", "digest"), None);
	}
}

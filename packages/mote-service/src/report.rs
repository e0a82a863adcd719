use std::path::Path;

use time::{OffsetDateTime, macros::format_description};
use uuid::Uuid;

use mote_domain::TimeWindow;

use crate::Result;

#[derive(Clone, Debug)]
pub struct SummaryResult {
	pub note_paths: Vec<std::path::PathBuf>,
	pub summary: String,
}

#[derive(Clone, Copy, Debug)]
pub struct RunMetadata {
	pub run_id: Uuid,
	pub generated_at: OffsetDateTime,
	pub window: TimeWindow,
}

#[derive(Clone, Debug)]
pub struct Digest {
	pub run_id: Uuid,
	pub subject: String,
	pub body: String,
}

/// Assemble the digest from summaries in request order. Deterministic for
/// identical inputs.
pub fn assemble(results: &[SummaryResult], meta: &RunMetadata) -> Result<Digest> {
	let subject = subject_line(&meta.window)?;
	let prefix = if meta.window.is_single_day() {
		"Today's summarized notes:"
	} else {
		"Summarized notes for the period:"
	};
	let mut body = format!("{prefix}\n");

	for result in results {
		let sources = result
			.note_paths
			.iter()
			.map(|path| note_ref(path))
			.collect::<Vec<_>>()
			.join(", ");

		body.push_str(&format!("\n{sources}\n{}\n", result.summary));
	}

	Ok(Digest { run_id: meta.run_id, subject, body })
}

/// The "no updates" notice mailed when the selection is empty and the
/// configuration asks for one.
pub fn empty_notice(meta: &RunMetadata) -> Result<Digest> {
	Ok(Digest {
		run_id: meta.run_id,
		subject: subject_line(&meta.window)?,
		body: "No notes qualified for this digest window.\n".to_string(),
	})
}

fn subject_line(window: &TimeWindow) -> Result<String> {
	let format = format_description!("[year]-[month]-[day]");
	let end = window.end.format(format)?;

	if window.is_single_day() {
		Ok(format!("Note digest {end}"))
	} else {
		Ok(format!("Note digest {} to {end}", window.start.format(format)?))
	}
}

fn note_ref(path: &Path) -> String {
	path.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
	use time::macros::{datetime, time};

	use super::*;

	fn meta(days: u32) -> RunMetadata {
		let now = datetime!(2025-03-10 12:00 UTC);
		let window = mote_domain::window::compute(days, time!(0:00), time!(23:59), now)
			.expect("Expected a window.");

		RunMetadata { run_id: Uuid::nil(), generated_at: now, window }
	}

	fn result(name: &str, summary: &str) -> SummaryResult {
		SummaryResult {
			note_paths: vec![std::path::PathBuf::from(format!("/vault/{name}.md"))],
			summary: summary.to_string(),
		}
	}

	#[test]
	fn single_day_subject_names_the_day() {
		let digest =
			assemble(&[result("a", "s")], &meta(1)).expect("Expected a digest.");

		assert_eq!(digest.subject, "Note digest 2025-03-10");
		assert!(digest.body.starts_with("Today's summarized notes:"));
	}

	#[test]
	fn multi_day_subject_names_the_range() {
		let digest = assemble(&[result("a", "s")], &meta(3)).expect("Expected a digest.");

		assert_eq!(digest.subject, "Note digest 2025-03-08 to 2025-03-10");
		assert!(digest.body.starts_with("Summarized notes for the period:"));
	}

	#[test]
	fn body_groups_each_summary_under_its_sources() {
		let digest = assemble(
			&[result("alpha", "First summary."), result("beta", "Second summary.")],
			&meta(1),
		)
		.expect("Expected a digest.");
		let alpha = digest.body.find("alpha\nFirst summary.").expect("Expected alpha section.");
		let beta = digest.body.find("beta\nSecond summary.").expect("Expected beta section.");

		assert!(alpha < beta);
	}

	#[test]
	fn assembly_is_deterministic() {
		let results = [result("a", "one"), result("b", "two")];
		let first = assemble(&results, &meta(2)).expect("Expected a digest.");
		let second = assemble(&results, &meta(2)).expect("Expected a digest.");

		assert_eq!(first.subject, second.subject);
		assert_eq!(first.body, second.body);
	}
}

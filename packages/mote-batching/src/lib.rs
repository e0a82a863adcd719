use std::path::PathBuf;

use unicode_segmentation::UnicodeSegmentation;

/// Conservative sizing proxy: one token per this many grapheme clusters.
/// Exact tokenization belongs to the API; this only has to avoid overshooting
/// the request budget, so it leans low.
const GRAPHEMES_PER_TOKEN: usize = 2;

const NOTE_SEPARATOR: &str = "\n\n---\n\n";

/// A selected note ready for packing, rendered in selection order.
#[derive(Clone, Debug)]
pub struct NoteInput {
	pub path: PathBuf,
	pub title: String,
	pub text: String,
}

/// One summarization call: rendered input, the contributing note paths, and
/// whether the input had to be cut to fit the budget.
#[derive(Clone, Debug)]
pub struct SummaryRequest {
	pub note_paths: Vec<PathBuf>,
	pub input: String,
	pub estimated_tokens: u32,
	pub truncated: bool,
}

pub fn estimate_tokens(text: &str) -> u32 {
	text.graphemes(true).count().div_ceil(GRAPHEMES_PER_TOKEN) as u32
}

/// Pack notes into as few requests as fit under `max_input_tokens`,
/// preserving order. A note whose rendering alone exceeds the budget becomes
/// its own truncated request; no note is ever dropped.
pub fn pack(notes: &[NoteInput], max_input_tokens: u32) -> Vec<SummaryRequest> {
	let budget = max_input_tokens.max(1);
	let mut requests = Vec::new();
	let mut current_paths: Vec<PathBuf> = Vec::new();
	let mut current_input = String::new();

	for note in notes {
		let rendered = render(note);
		let candidate = if current_input.is_empty() {
			rendered.clone()
		} else {
			format!("{current_input}{NOTE_SEPARATOR}{rendered}")
		};

		if estimate_tokens(&candidate) <= budget {
			current_input = candidate;
			current_paths.push(note.path.clone());

			continue;
		}

		if !current_input.is_empty() {
			requests.push(flush(&mut current_paths, &mut current_input));
		}

		if estimate_tokens(&rendered) > budget {
			tracing::warn!(
				path = %note.path.display(),
				"Note alone exceeds the request budget. Emitting truncated."
			);
			let input = truncate_to_budget(&rendered, budget);

			requests.push(SummaryRequest {
				note_paths: vec![note.path.clone()],
				estimated_tokens: estimate_tokens(&input),
				input,
				truncated: true,
			});
		} else {
			current_input = rendered;
			current_paths.push(note.path.clone());
		}
	}

	if !current_input.is_empty() {
		requests.push(flush(&mut current_paths, &mut current_input));
	}

	requests
}

fn render(note: &NoteInput) -> String {
	format!("[{}]\n{}", note.title, note.text)
}

fn flush(paths: &mut Vec<PathBuf>, input: &mut String) -> SummaryRequest {
	let input = std::mem::take(input);

	SummaryRequest {
		note_paths: std::mem::take(paths),
		estimated_tokens: estimate_tokens(&input),
		input,
		truncated: false,
	}
}

fn truncate_to_budget(text: &str, budget: u32) -> String {
	let keep = (budget as usize).saturating_mul(GRAPHEMES_PER_TOKEN);

	text.graphemes(true).take(keep).collect()
}

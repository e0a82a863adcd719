use std::sync::LazyLock;

use regex::Regex;

static LIST_ITEM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(\s*)-\s+").expect("List item pattern must compile."));
static TAG_WORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"#\w+").expect("Tag word pattern must compile."));

/// Whether `text` contains `#<target_tag>` as a standalone token.
///
/// The match is case-sensitive and bounded: the tag must be followed by
/// end-of-input, whitespace, or a non-word character other than `#`, so a
/// longer tag sharing the prefix does not match.
pub fn matches(text: &str, target_tag: &str) -> bool {
	tag_token_regex(target_tag).map(|regex| regex.is_match(text)).unwrap_or(false)
}

/// Extract the markdown list blocks of `body` that carry the target tag.
///
/// A block starts at a `- ` item and extends over blank lines, deeper-indented
/// lines, and same-or-deeper continuation lines that do not open a new item.
/// Blocks are joined with a blank line. Returns `None` when no block carries
/// the tag.
pub fn extract_tagged_blocks(body: &str, target_tag: &str) -> Option<String> {
	let regex = tag_token_regex(target_tag)?;

	if !regex.is_match(body) {
		return None;
	}

	let lines = body.lines().collect::<Vec<_>>();
	let mut blocks = Vec::new();
	let mut index = 0;

	while index < lines.len() {
		let Some(indent) = list_item_indent(lines[index]) else {
			index += 1;

			continue;
		};
		let mut next = index + 1;

		while next < lines.len() && continues_block(lines[next], indent) {
			next += 1;
		}

		let block = lines[index..next].join("\n");

		if regex.is_match(&block) {
			blocks.push(block);
		}

		index = next;
	}

	if blocks.is_empty() { None } else { Some(blocks.join("\n\n")) }
}

/// Strip `#word` tags and surrounding whitespace before summarization.
pub fn clean(text: &str) -> String {
	TAG_WORD.replace_all(text, "").trim().to_string()
}

fn tag_token_regex(target_tag: &str) -> Option<Regex> {
	if target_tag.trim().is_empty() {
		return None;
	}

	Regex::new(&format!("#{}(?:$|\\s|[^\\w#])", regex::escape(target_tag))).ok()
}

fn continues_block(line: &str, base_indent: usize) -> bool {
	if line.trim().is_empty() {
		return true;
	}

	let indent = leading_whitespace(line);

	if indent > base_indent {
		return true;
	}

	list_item_indent(line).is_none() && indent >= base_indent
}

fn list_item_indent(line: &str) -> Option<usize> {
	LIST_ITEM.captures(line).map(|caps| caps[1].len())
}

fn leading_whitespace(line: &str) -> usize {
	line.len() - line.trim_start().len()
}

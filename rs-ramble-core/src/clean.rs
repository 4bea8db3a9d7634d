use std::sync::LazyLock;

use regex::Regex;

static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());
static NUMBERS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\b|\s+-?|^-?)(\d+|\d*\.\d+)\b").unwrap());
static CHAPTER_HEADINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Chapter \d+").unwrap());

/// Strips noise from raw corpus text.
///
/// Applied in order:
/// 1. runs of two or more dashes become a single space
/// 2. `[...]` annotations are deleted (non-greedy, up to the first `]`)
/// 3. standalone integers and decimals are deleted, with an optional leading `-`
/// 4. whitespace runs collapse to one space and the result is trimmed
///
/// A deletion can bring two dashes or two digits together (`-[x]-`), so the
/// passes repeat until the text stops changing. Every pass either shortens
/// the text or only normalizes whitespace, so this terminates, and the
/// result is a fixpoint: `clean(clean(x)) == clean(x)`.
///
/// Unbalanced brackets are left as literal text.
pub fn clean(text: &str) -> String {
	let mut current = clean_pass(text);
	loop {
		let next = clean_pass(&current);
		if next == current {
			return current;
		}
		current = next;
	}
}

fn clean_pass(text: &str) -> String {
	let text = DASHES.replace_all(text, " ");
	let text = BRACKETS.replace_all(&text, "");
	let text = NUMBERS.replace_all(&text, "");
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `Chapter <n>` headings from a literary work.
pub fn strip_chapter_headings(text: &str) -> String {
	CHAPTER_HEADINGS.replace_all(text, "").into_owned()
}

//! Hashtag counting over a directory of Markdown notes.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tagcloud::Tag;
use tracing::debug;
use walkdir::WalkDir;

/// One tag per distinct hashtag, weighted by its number of occurrences,
/// heaviest first.
pub fn collect_tags(notes_dir: &Path) -> Result<Vec<Tag>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(notes_dir) {
        let entry = entry.with_context(|| {
            format!("failed to walk notes directory '{}'", notes_dir.display())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for path in &files {
        let text = read_note(path)?;
        for tag in extract_hashtags(&text) {
            *counts.entry(tag).or_default() += 1;
        }
    }

    debug!(files = files.len(), tags = counts.len(), "counted hashtags");

    let mut entries: Vec<(String, u32)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(entries
        .into_iter()
        .map(|(name, count)| Tag::new(name.clone(), f64::from(count)).with_key(name))
        .collect())
}

fn read_note(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read note '{}'", path.display()))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn is_tag_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | '/' | ':')
}

fn opens_tag(previous: Option<char>) -> bool {
    previous.is_none_or(|p| p.is_whitespace() || matches!(p, '(' | '[' | ',' | ';'))
}

/// Normalized hashtags in `text`, in order of appearance.
///
/// A tag starts with `#` at a word boundary followed by a letter, so
/// headings (`# Title`) and issue references (`#12`) are skipped.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut previous = None;

    for (index, ch) in text.char_indices() {
        if ch == '#' && opens_tag(previous) {
            let raw: String = text[index + 1..]
                .chars()
                .take_while(|c| is_tag_char(*c))
                .collect();
            if raw.chars().next().is_some_and(char::is_alphabetic) {
                tags.extend(normalize_tag(&raw));
            }
        }
        previous = Some(ch);
    }

    tags
}

/// Lowercases a raw hashtag. `/` and `:` both become the `:` hierarchy
/// separator; other punctuation collapses into single dashes.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let mut result = String::with_capacity(raw.len());
    let mut last_separator = true;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            result.extend(ch.to_lowercase());
            last_separator = false;
        } else if matches!(ch, '/' | ':') {
            while result.ends_with('-') {
                result.pop();
            }
            if !result.is_empty() && !result.ends_with(':') {
                result.push(':');
            }
            last_separator = true;
        } else if !last_separator {
            result.push('-');
            last_separator = true;
        }
    }

    while result.ends_with('-') || result.ends_with(':') {
        result.pop();
    }

    if result.is_empty() { None } else { Some(result) }
}

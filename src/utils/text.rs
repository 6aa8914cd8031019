use chrono::{DateTime, SecondsFormat};

/// First candidate that still has content after trimming.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
}

/// Drop markup from CMS rich text and collapse whitespace.
/// A `<` only opens a tag when a letter, `/` or `!` follows it, so plain
/// comparisons such as `< 0.5%` survive.
pub fn strip_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_tag {
            in_tag = c != '>';
            continue;
        }
        let opens_tag = c == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || *next == '/' || *next == '!');
        if opens_tag {
            in_tag = true;
            text.push(' ');
        } else {
            text.push(c);
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    let mut collapsed = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        let glued = word.starts_with(['.', ',', ';', ':', '!', '?', ')']);
        if !collapsed.is_empty() && !glued {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

/// Cut to at most `max_chars` characters, preferring a word boundary.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let cut: String = input.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(idx) if idx > max_chars / 2 => format!("{}...", cut[..idx].trim_end()),
        _ => format!("{}...", cut.trim_end()),
    }
}

pub fn rfc3339_from_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn date_from_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Human date used on rendered pages, e.g. `March 4, 2025`.
pub fn display_date_from_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

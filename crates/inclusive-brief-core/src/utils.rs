//! Utility functions for text processing and message splitting.

use unicode_segmentation::UnicodeSegmentation;

/// Length of `text` in UTF-16 code units, the unit Telegram counts message limits in.
#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Splits a long plain-text message into parts of at most `max_length`
/// UTF-16 code units.
///
/// A message that fits is returned unchanged. Otherwise parts break after a
/// newline where possible, and a line longer than `max_length` is split by
/// grapheme clusters. Joining the parts gives back the input, except that
/// whitespace-only parts are dropped. A single grapheme longer than
/// `max_length` becomes a part of its own.
///
/// # Examples
///
/// ```
/// use inclusive_brief_core::utils::split_long_message;
/// let long_msg = "A very long message...\n".repeat(300);
/// let parts = split_long_message(&long_msg, 4000);
/// assert!(parts.len() > 1);
/// assert_eq!(parts.concat(), long_msg);
/// ```
#[must_use]
pub fn split_long_message(message: &str, max_length: usize) -> Vec<String> {
    if message.is_empty() {
        return Vec::new();
    }

    if utf16_len(message) <= max_length {
        return vec![message.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in message.split_inclusive('\n') {
        let line_len = utf16_len(line);
        if current_len + line_len <= max_length {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        flush_part(&mut parts, &mut current);
        current_len = 0;

        if line_len <= max_length {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        for grapheme in line.graphemes(true) {
            let grapheme_len = utf16_len(grapheme);
            if current_len + grapheme_len > max_length && !current.is_empty() {
                flush_part(&mut parts, &mut current);
                current_len = 0;
            }
            current.push_str(grapheme);
            current_len += grapheme_len;
        }
    }

    flush_part(&mut parts, &mut current);
    parts
}

/// Moves `current` into `parts`. Telegram rejects blank messages, so those are dropped.
fn flush_part(parts: &mut Vec<String>, current: &mut String) {
    let part = std::mem::take(current);
    if !part.trim().is_empty() {
        parts.push(part);
    }
}

/// Safely truncates a string to a maximum character length (not bytes).
///
/// # Examples
///
/// ```
/// use inclusive_brief_core::utils::truncate_str;
/// let s = "Привет, мир!";
/// assert_eq!(truncate_str(s, 6), "Привет");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_unicode() {
        let s = "Привет, мир!";
        assert_eq!(truncate_str(s, 6), "Привет");
        assert_eq!(truncate_str(s, 50), "Привет, мир!");
    }

    #[test]
    fn test_short_message_is_untouched() {
        let input = "**Image:**\n\n* A cat.";
        assert_eq!(split_long_message(input, 4000), vec![input.to_string()]);
    }

    #[test]
    fn test_cyrillic_reply_within_limit_is_untouched() {
        let input = "Привет мир\n".repeat(227);
        assert!(input.len() > 4000);
        assert_eq!(utf16_len(&input), 2497);
        assert_eq!(split_long_message(&input, 4000), vec![input]);
    }

    #[test]
    fn test_split_long_message_simple() {
        let input = "Line 1\nLine 2\nLine 3";
        let parts = split_long_message(input, 13);
        assert_eq!(parts, vec!["Line 1\n", "Line 2\n", "Line 3"]);
        assert_eq!(parts.concat(), input);
    }

    #[test]
    fn test_code_fences_are_not_added() {
        let input = "Start\n```\nLine 1\nLine 2\n```\nEnd";
        let parts = split_long_message(input, 15);

        assert!(parts.len() > 1);
        assert_eq!(parts.concat(), input);
        assert_eq!(parts.concat().matches("```").count(), 2);
    }

    #[test]
    fn test_blank_parts_are_dropped() {
        let input = format!("{}\n{}\n", "a".repeat(8), " ".repeat(9));
        let parts = split_long_message(&input, 10);
        assert_eq!(parts, vec![format!("{}\n", "a".repeat(8))]);
    }

    #[test]
    fn test_split_very_long_line() {
        let input = "a".repeat(10000);
        let parts = split_long_message(&input, 4000);

        assert_eq!(parts.len(), 3);
        for part in &parts {
            assert!(utf16_len(part) <= 4000);
        }
        assert_eq!(parts.concat(), input);
    }

    #[test]
    fn test_split_unicode_graphemes() {
        let input = "🔥".repeat(5000);
        let parts = split_long_message(&input, 4000);

        assert_eq!(parts.len(), 5);
        for part in &parts {
            assert!(utf16_len(part) <= 4000);
        }
        assert_eq!(parts.concat(), input);
    }

    #[test]
    fn test_oversized_grapheme_never_yields_empty_part() {
        let family = "👨\u{200d}👩\u{200d}👧";
        assert_eq!(utf16_len(family), 8);

        let parts = split_long_message(&format!("ab{family}{family}"), 4);
        assert_eq!(parts, vec!["ab".to_string(), family.to_string(), family.to_string()]);
    }
}

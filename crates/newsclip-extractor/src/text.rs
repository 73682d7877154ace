//! Text normalization helpers

/// Normalize extracted text: runs of spaces and tabs collapse to a single
/// space, runs of three or more newlines collapse to exactly two, and the
/// result is trimmed.
pub fn clean_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut pending_space = false;
    let mut newline_run = 0usize;

    for ch in content.chars() {
        if ch == '\n' {
            newline_run += 1;
            pending_space = false;
            continue;
        }
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if newline_run > 0 {
            out.push('\n');
            if newline_run >= 2 {
                out.push('\n');
            }
            newline_run = 0;
            pending_space = false;
        } else if pending_space && !out.is_empty() {
            out.push(' ');
            pending_space = false;
        } else {
            pending_space = false;
        }
        out.push(ch);
    }

    out.trim().to_string()
}

/// Count whitespace-delimited non-empty tokens
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Hard substring cut at `max` characters, char-boundary safe, not word-aware
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max).collect()
}

// src/core/sanitize.rs

/// Fold every whitespace run (line breaks included) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Drop embedded line breaks so review bodies stay on one logical line.
/// Other whitespace is left alone; ends are trimmed.
pub fn strip_line_breaks(s: &str) -> String {
    s.chars()
        .filter(|&c| !is_line_break(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// File-system-safe stem for an entity id (used for per-id page directories).
pub fn sanitize_id_filename(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut last_us = false;
    for ch in id.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { s!("entity") } else { out }
}

//! Line grammar shared by declaration and override files
//!
//! The format is not a full grammar: every line is either a `key: value`
//! field, a block opener (`flag {`), a block closer (`}`), or ignored.
//! Lines whose first non-blank character is `#` are comments.

/// One recognized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `key: value`, value unquoted
    Field {
        key: &'a str,
        value: &'a str,
        line_no: usize,
    },
    /// `label {`
    Open { label: &'a str, line_no: usize },
    /// `}`
    Close { line_no: usize },
}

/// Split `content` into recognized lines. Line numbers are 1-based.
///
/// A line of closers such as `}}` yields one `Close` per brace.
pub fn lex(content: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let closers = count_closers(raw);
        if closers > 0 {
            lines.extend(std::iter::repeat_n(Line::Close { line_no }, closers));
        } else if let Some(line) = lex_line(raw, line_no) {
            lines.push(line);
        }
    }
    lines
}

/// Number of `}` on a line that starts with one, stopping at a comment.
fn count_closers(raw: &str) -> usize {
    let line = raw.trim();
    if !line.starts_with('}') {
        return 0;
    }
    line.split('#')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| *c == '}')
        .count()
}

fn lex_line(raw: &str, line_no: usize) -> Option<Line<'_>> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if let Some(head) = line.strip_suffix('{') {
        let label = head.trim_end();
        let label = label.strip_suffix(':').unwrap_or(label).trim_end();
        return Some(Line::Open { label, line_no });
    }

    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    Some(Line::Field {
        key,
        value: unquote(value.trim()),
        line_no,
    })
}

/// Strip one layer of surrounding double quotes.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

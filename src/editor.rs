//! Marked-section editing of the hosts file.
//!
//! The managed section is delimited by two literal marker lines. Everything
//! this module does is a pure text transform: [`strip`] removes any existing
//! managed section (self-healing against manual duplication), [`insert`]
//! appends a fresh one. Content outside the section is preserved byte for
//! byte, modulo trailing-whitespace normalization at the end of the file.

/// First line of the managed section.
pub const MARKER_START: &str = "# BEGIN dblock";

/// Last line of the managed section.
pub const MARKER_END: &str = "# END dblock";

/// Scanner state while walking the file line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InSection,
}

/// Removes every managed section from `content`.
///
/// Marker matching is substring-based on the whitespace-trimmed line and
/// case-sensitive. Blank lines immediately preceding a start marker are
/// dropped along with the section, so no orphaned separator is left behind;
/// trailing blank lines are trimmed from the result. An unterminated start
/// marker discards everything through the end of the input.
///
/// Idempotent: `strip(strip(x)) == strip(x)`.
#[must_use]
pub fn strip(content: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut state = State::Outside;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.contains(MARKER_START) {
            state = State::InSection;
            // The blank separator above the section belongs to it.
            while kept.last().is_some_and(|l| l.trim().is_empty()) {
                kept.pop();
            }
            continue;
        }
        if trimmed.contains(MARKER_END) {
            state = State::Outside;
            continue;
        }
        if state == State::Outside {
            kept.push(line);
        }
    }

    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

/// Appends a managed section containing `body` to already-stripped `content`.
///
/// The content's trailing spaces and newlines are trimmed, then one blank
/// separator line, the start marker, `body`, and the end marker are appended.
/// The result ends with exactly one newline. Empty content gets no separator:
/// the section becomes the entire file.
#[must_use]
pub fn insert(content: &str, body: &str) -> String {
    let stripped = content.trim_end_matches([' ', '\n']);

    let mut out = String::with_capacity(stripped.len() + body.len() + 64);
    if !stripped.is_empty() {
        out.push_str(stripped);
        out.push_str("\n\n");
    }
    out.push_str(MARKER_START);
    out.push('\n');
    out.push_str(body);
    out.push('\n');
    out.push_str(MARKER_END);
    out.push('\n');
    out
}

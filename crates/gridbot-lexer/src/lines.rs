//! The instruction-line splitter.
//!
//! This is the coarse tokenizer: raw multi-line learner text in, an
//! ordered list of trimmed, non-blank, non-comment lines out. It does no
//! syntax validation and no multi-line merging — block structure is the
//! parser's job, working from the character-level token stream instead.

/// The comment marker. A line whose first non-whitespace characters are
/// this marker is dropped entirely.
pub const COMMENT_MARKER: &str = "//";

/// One surviving instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    /// The trimmed line text.
    pub text: String,
    /// 1-based line number in the original source.
    pub number: u32,
}

/// Split raw learner text into instruction lines.
///
/// Preserves original relative order. Blank lines and comment lines are
/// removed; trailing comments on code lines are left in place (the
/// scanner strips those).
pub fn instruction_lines(source: &str) -> Vec<InstructionLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with(COMMENT_MARKER) {
                return None;
            }
            Some(InstructionLine {
                text: text.to_string(),
                number: idx as u32 + 1,
            })
        })
        .collect()
}

//! Text wrapping, pagination, and line-budget accounting.

use core::fmt;
use core::mem;
use serde::{Deserialize, Serialize};

/// Line-breaking policy for turning source text into display lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// Greedy word accumulation; a single word longer than the limit stays
    /// intact on its own line.
    WordWrap,
    /// Split every `max_line_length` characters regardless of word
    /// boundaries.
    #[default]
    HardSplit,
}

/// Wrapping rejected before any processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapError {
    /// `max_line_length` must be at least 1.
    InvalidLineLength,
    /// `lines_per_page` must be at least 1.
    InvalidLinesPerPage,
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineLength => write!(f, "max line length must be at least 1"),
            Self::InvalidLinesPerPage => write!(f, "lines per page must be at least 1"),
        }
    }
}

impl std::error::Error for WrapError {}

/// Wrapped content exceeds the configured total-line budget.
///
/// Not a failure by itself: the caller decides whether to truncate and
/// continue or to abort. No truncation happens inside the wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overflow {
    /// Display lines the text actually needs.
    pub required: usize,
    /// Lines the budget allows.
    pub available: usize,
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text requires {} lines but only {} are available",
            self.required, self.available
        )
    }
}

/// Wrap raw text into display lines of at most `max_line_length` characters.
///
/// Source lines are separated by `\n`; a source line with no words yields
/// exactly one empty display line so intentional blank lines survive as
/// vertical-space placeholders.
pub fn wrap_text(
    text: &str,
    max_line_length: usize,
    mode: WrapMode,
) -> Result<Vec<String>, WrapError> {
    if max_line_length == 0 {
        return Err(WrapError::InvalidLineLength);
    }
    let mut lines = Vec::new();
    for source in text.split('\n') {
        match mode {
            WrapMode::HardSplit => hard_split_into(source, max_line_length, &mut lines),
            WrapMode::WordWrap => word_wrap_into(source, max_line_length, &mut lines),
        }
    }
    Ok(lines)
}

fn hard_split_into(source: &str, limit: usize, out: &mut Vec<String>) {
    if source.is_empty() {
        out.push(String::new());
        return;
    }
    let chars: Vec<char> = source.chars().collect();
    for chunk in chars.chunks(limit) {
        out.push(chunk.iter().collect());
    }
}

fn word_wrap_into(source: &str, limit: usize, out: &mut Vec<String>) {
    let mut words = source.split_whitespace();
    let Some(first) = words.next() else {
        out.push(String::new());
        return;
    };
    let mut current = first.to_string();
    let mut current_len = first.chars().count();
    for word in words {
        let word_len = word.chars().count();
        if current_len + word_len + 1 > limit {
            out.push(mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += word_len + 1;
        }
    }
    out.push(current);
}

/// Partition display lines into consecutive pages of `lines_per_page`.
///
/// The final page may be shorter; empty input yields no pages.
pub fn paginate(lines: Vec<String>, lines_per_page: usize) -> Result<Vec<Vec<String>>, WrapError> {
    if lines_per_page == 0 {
        return Err(WrapError::InvalidLinesPerPage);
    }
    let mut pages = Vec::with_capacity(lines.len().div_ceil(lines_per_page));
    let mut page = Vec::new();
    for line in lines {
        if page.len() == lines_per_page {
            pages.push(mem::replace(&mut page, Vec::with_capacity(lines_per_page)));
        }
        page.push(line);
    }
    if !page.is_empty() {
        pages.push(page);
    }
    Ok(pages)
}

/// Report an [`Overflow`] when the wrapped line count exceeds `budget`.
pub fn check_line_budget(lines: &[String], budget: usize) -> Result<(), Overflow> {
    if lines.len() > budget {
        return Err(Overflow {
            required: lines.len(),
            available: budget,
        });
    }
    Ok(())
}

/// Keep the first `budget` display lines; the caller's truncate decision.
pub fn truncate_to_budget(lines: &mut Vec<String>, budget: usize) {
    lines.truncate(budget);
}

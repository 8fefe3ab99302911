//! Pure formatting of rich-text runs.
//!
//! Emphasis is emitted as a stack: the opening delimiters are concatenated in
//! encounter order and the closing delimiters are the same string reversed,
//! so `[Bold, Code]` on `x` yields ``**`x`**``.

use tracing::warn;

use crate::model::TextRun;

/// Format a single run as markdown.
///
/// # Examples
///
/// ```
/// use notion_scribe::markdown::format_run;
/// use notion_scribe::model::{Emphasis, TextRun};
///
/// assert_eq!(format_run(&TextRun::styled("hi", &[Emphasis::Bold])), "**hi**");
/// assert_eq!(format_run(&TextRun::equation("a^2+b^2")), "$ a^2+b^2 $");
/// ```
pub fn format_run(run: &TextRun) -> String {
    match run {
        TextRun::Text { content, emphasis } => {
            let open: String = emphasis.iter().map(|e| e.marker()).collect();
            let close: String = open.chars().rev().collect();
            format!("{open}{content}{close}")
        }
        TextRun::Equation { expression } => format!("$ {expression} $"),
        TextRun::Other {
            type_name,
            plain_text,
        } => {
            warn!(run_type = %type_name, "unsupported rich text type, using plain text");
            plain_text.clone()
        }
    }
}

/// Format a sequence of runs, concatenated without separators.
pub fn format_rich_text(runs: &[TextRun]) -> String {
    runs.iter().map(format_run).collect()
}

//! Page-level layout.
//!
//! A problem page is a sequence of `##` sections whose `###` headings are
//! collapsible solution write-ups. Only those two heading levels shape the
//! page; each `###` becomes a `<details>` block wrapping its rendered children.

use tracing::debug;

use crate::error::Result;
use crate::model::{BlockData, BlockId, ContentBlock};
use crate::notion::BlockSource;

use super::render::render_children;
use super::rich_text::format_rich_text;

/// Heading text of the personal notes section, which is never published.
pub const DEFAULT_NOTES_LABEL: &str = "📝 Notes";

/// Fetch and render the body of a page.
pub fn render_page<S: BlockSource + ?Sized>(
    source: &S,
    page_id: &BlockId,
    notes_label: &str,
) -> Result<String> {
    let blocks = source.children(page_id)?;
    render_page_blocks(source, &blocks, notes_label)
}

/// Render already-fetched top-level blocks of a page.
///
/// A `##` heading whose text equals `notes_label` is dropped together with
/// every top-level block up to the next `##` heading.
pub fn render_page_blocks<S: BlockSource + ?Sized>(
    source: &S,
    blocks: &[ContentBlock],
    notes_label: &str,
) -> Result<String> {
    let mut output = String::new();
    let mut in_notes = false;

    for block in blocks {
        match &block.data {
            BlockData::Heading {
                level: 2,
                rich_text,
            } => {
                let heading = format_rich_text(rich_text);
                in_notes = heading == notes_label;
                if in_notes {
                    debug!(block_id = %block.id, "skipping notes section");
                    continue;
                }
                output.push_str(&format!("## {heading}\n"));
            }

            _ if in_notes => {}

            BlockData::Heading {
                level: 3,
                rich_text,
            } => {
                output.push_str(&format!(
                    "<details>\n<summary>{}</summary>\n",
                    format_rich_text(rich_text)
                ));
                output.push_str(&render_children(source, &block.id)?);
                output.push_str("</details>\n\n");
            }

            other => {
                debug!(block_id = %block.id, kind = ?other.kind(), "block outside page layout skipped");
            }
        }
    }

    Ok(output)
}

//! Container rendering: blocks → Markdown.
//!
//! This module provides the recursive walk over a container's children. The
//! only I/O is the [`BlockSource`] lookup used to expand nested toggles;
//! everything else is pure string accumulation.

use tracing::warn;

use crate::error::Result;
use crate::model::{Background, BlockData, BlockId, BlockKind, ContentBlock};
use crate::notion::BlockSource;

use super::rich_text::format_rich_text;

/// Context for rendering one container (pure string accumulation plus child fetches).
///
/// A fresh context is used for every container, so list runs never continue
/// across a toggle boundary.
pub struct RenderContext<'a, S: BlockSource + ?Sized> {
    source: &'a S,
    // Accumulated output
    output: String,
    // List run state
    previous_kind: Option<BlockKind>,
    numbered_run_counter: usize,
}

impl<'a, S: BlockSource + ?Sized> RenderContext<'a, S> {
    /// Create a new render context that expands nested containers through `source`.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            output: String::new(),
            previous_kind: None,
            numbered_run_counter: 0,
        }
    }

    /// Render the blocks in order, consuming the context and returning the markdown.
    pub fn render(mut self, blocks: &[ContentBlock]) -> Result<String> {
        for block in blocks {
            self.walk_block(block)?;
        }
        Ok(self.output)
    }

    /// Whether `kind` opens a new run, i.e. the previous sibling was of another kind.
    fn starts_run(&self, kind: BlockKind) -> bool {
        self.previous_kind != Some(kind)
    }

    fn walk_block(&mut self, block: &ContentBlock) -> Result<()> {
        let kind = block.kind();

        match &block.data {
            BlockData::Paragraph {
                rich_text,
                background,
            } => {
                let text = format_rich_text(rich_text);
                match background {
                    Background::Default => {
                        self.output.push_str(&text);
                        self.output.push('\n');
                    }
                    Background::Highlighted => {
                        self.output.push_str(&format!("\n*Intuition: {text}*\n"));
                    }
                }
            }

            BlockData::BulletedItem { rich_text } => {
                if self.starts_run(kind) {
                    self.output.push('\n');
                }
                self.output
                    .push_str(&format!("- {}\n", format_rich_text(rich_text)));
            }

            BlockData::NumberedItem { rich_text } => {
                if self.starts_run(kind) {
                    self.output.push('\n');
                    self.numbered_run_counter = 0;
                } else {
                    self.numbered_run_counter += 1;
                }
                self.output.push_str(&format!(
                    "{}. {}\n",
                    self.numbered_run_counter + 1,
                    format_rich_text(rich_text)
                ));
            }

            BlockData::Toggle { rich_text } => {
                self.output
                    .push_str(&format!("**{}**\n", format_rich_text(rich_text)));
                let nested = render_children(self.source, &block.id)?;
                self.output.push_str(&nested);
            }

            BlockData::Code {
                rich_text,
                language,
            } => {
                // Only the first segment carries the code body.
                let body = rich_text.first().map(|run| run.raw_text()).unwrap_or("");
                self.output
                    .push_str(&format!("```{language}\n{body}\n```\n"));
            }

            BlockData::Equation { expression } => {
                self.output.push_str(&format!("$$ {expression} $$\n"));
            }

            BlockData::Heading { level, rich_text } => {
                for _ in 0..*level {
                    self.output.push('#');
                }
                self.output.push(' ');
                self.output.push_str(&format_rich_text(rich_text));
                self.output.push('\n');
            }

            BlockData::Image => {}

            BlockData::Unsupported {
                type_name,
                fallback_text,
            } => {
                warn!(block_id = %block.id, block_type = %type_name, "unsupported block type, using plain text");
                self.output.push_str(fallback_text);
                self.output.push('\n');
            }
        }

        self.previous_kind = Some(kind);
        Ok(())
    }
}

/// Render all children of a container block to markdown.
///
/// This is the main entry point for toggle and section rendering. It fetches
/// the children of `id` from `source`, then walks them with a fresh
/// [`RenderContext`], recursing into nested toggles.
pub fn render_children<S: BlockSource + ?Sized>(source: &S, id: &BlockId) -> Result<String> {
    let children = source.children(id)?;
    RenderContext::new(source).render(&children)
}

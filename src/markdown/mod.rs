//! Markdown generation from content blocks.
//!
//! This module renders a page's block tree to Markdown. The design separates
//! pure formatting from fetching:
//!
//! - [`rich_text`]: Pure formatting of text runs (emphasis, inline math)
//! - [`render`]: Recursive container rendering with list-run tracking
//! - [`page`]: Page layout (section headings, collapsible write-ups, notes filter)
//!
//! The only I/O is through the [`BlockSource`](crate::notion::BlockSource)
//! passed in, which expands nested containers on demand.
//!
//! ## Design Notes
//!
//! - **List runs**: a run of consecutive bulleted or numbered items is opened
//!   with a blank line. Numbering restarts at 1 whenever a run is broken by any
//!   other block, images included.
//! - **Emphasis nesting**: closing delimiters are the opening ones reversed.
//! - **Lossy by intent**: images are dropped, and unknown blocks or runs fall
//!   back to their plain text with a warning.

mod page;
mod render;
mod rich_text;

pub use page::{DEFAULT_NOTES_LABEL, render_page, render_page_blocks};
pub use render::{RenderContext, render_children};
pub use rich_text::{format_rich_text, format_run};

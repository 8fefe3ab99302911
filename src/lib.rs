//! # notion-scribe
//!
//! Turns problem pages from a Notion database into polished `README.md`
//! walkthroughs with a language model.
//!
//! ## Features
//!
//! - Render Notion block trees (lists, toggles, code, math, headings) to Markdown
//! - Extract problem statement text from linked PDFs
//! - Cache assembled pages on disk as JSON
//! - Generate READMEs and `solution.cpp` files with Gemma or Gemini models
//!
//! ## Rendering
//!
//! The renderer only needs a [`notion::BlockSource`], so block trees can come
//! from the Notion API or from memory:
//!
//! ```
//! use notion_scribe::markdown::render_children;
//! use notion_scribe::model::{BlockData, BlockId, ContentBlock, TextRun};
//! use notion_scribe::notion::MemoryBlockSource;
//!
//! let item = |id: &str, text: &str| {
//!     ContentBlock::new(id, BlockData::BulletedItem { rich_text: vec![TextRun::plain(text)] })
//! };
//! let source = MemoryBlockSource::new().with_children("root", vec![item("a", "A"), item("b", "B")]);
//!
//! let markdown = render_children(&source, &BlockId::from("root")).unwrap();
//! assert_eq!(markdown, "\n- A\n- B\n");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod generate;
pub mod markdown;
pub mod model;
pub mod notion;
pub mod pdf;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{Error, FetchFailure, Result};
pub use generate::{GeminiClient, Generator, PromptConfig};
pub use notion::{BlockSource, DocumentStore, NotionClient};
pub use pdf::{HttpPdfSource, PdfSource};
pub use pipeline::{Outcome, PageBuilder, Prepared, ReadmeWriter};

//! Core data model for page processing.
//!
//! This module contains:
//! - Content blocks and their kind-specific payloads
//! - Rich-text runs and emphasis flags
//! - Page properties and the cached per-page record

mod block;
mod page;

// Re-export block types
pub use block::{BlockData, BlockId, BlockKind, Background, ContentBlock, Emphasis, TextRun};

// Re-export page types
pub use page::{PageProperties, PageRecord, PageSummary};

//! Document store access.
//!
//! The renderer only needs one capability, [`BlockSource`]: the ordered
//! children of a block. Page orchestration additionally needs the
//! [`DocumentStore`] queries for database entries and page properties.
//!
//! - [`NotionClient`]: blocking HTTP implementation against the Notion API
//! - [`MemoryBlockSource`]: in-memory block tree, for tests and offline use

mod client;
mod wire;

pub use client::NotionClient;

use std::collections::HashMap;
use std::io;

use crate::error::Result;
use crate::model::{BlockId, ContentBlock, PageProperties, PageSummary};

/// Ordered children of a block.
pub trait BlockSource {
    /// Fetch the children of `id`, in document order.
    fn children(&self, id: &BlockId) -> Result<Vec<ContentBlock>>;
}

/// Database and page queries on top of block access.
pub trait DocumentStore: BlockSource {
    /// All entries of a database, sorted ascending by their `Name` property.
    fn query_database(&self, database_id: &str) -> Result<Vec<PageSummary>>;

    /// Properties of one page.
    fn page_properties(&self, page_id: &BlockId) -> Result<PageProperties>;
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    fn children(&self, id: &BlockId) -> Result<Vec<ContentBlock>> {
        (**self).children(id)
    }
}

/// Block tree held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockSource {
    children: HashMap<BlockId, Vec<ContentBlock>>,
}

impl MemoryBlockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the children of `parent`.
    pub fn with_children(mut self, parent: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        self.insert(BlockId(parent.into()), blocks);
        self
    }

    pub fn insert(&mut self, parent: BlockId, blocks: Vec<ContentBlock>) {
        self.children.insert(parent, blocks);
    }
}

impl BlockSource for MemoryBlockSource {
    fn children(&self, id: &BlockId) -> Result<Vec<ContentBlock>> {
        self.children.get(id).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no children for block {id}")).into()
        })
    }
}

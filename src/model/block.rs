//! Content blocks and formatted text runs.

use std::fmt;

/// Opaque identifier of a block (or page) in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Inline emphasis applied to a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
}

impl Emphasis {
    /// The markdown delimiter that opens (and, reversed, closes) this emphasis.
    pub fn marker(self) -> &'static str {
        match self {
            Emphasis::Bold => "**",
            Emphasis::Italic => "*",
            Emphasis::Strikethrough => "~~",
            Emphasis::Underline => "__",
            Emphasis::Code => "`",
        }
    }
}

/// One formatted span of rich text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRun {
    /// Plain characters with zero or more emphasis flags, in encounter order.
    Text {
        content: String,
        emphasis: Vec<Emphasis>,
    },
    /// Inline math.
    Equation { expression: String },
    /// A run type the renderer has no rule for (mentions, ...).
    Other {
        type_name: String,
        plain_text: String,
    },
}

impl TextRun {
    /// Unformatted text run.
    pub fn plain(content: impl Into<String>) -> Self {
        TextRun::Text {
            content: content.into(),
            emphasis: Vec::new(),
        }
    }

    /// Text run with the given emphasis flags.
    pub fn styled(content: impl Into<String>, emphasis: &[Emphasis]) -> Self {
        TextRun::Text {
            content: content.into(),
            emphasis: emphasis.to_vec(),
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        TextRun::Equation {
            expression: expression.into(),
        }
    }

    /// The run's characters without any markdown decoration.
    pub fn raw_text(&self) -> &str {
        match self {
            TextRun::Text { content, .. } => content,
            TextRun::Equation { expression } => expression,
            TextRun::Other { plain_text, .. } => plain_text,
        }
    }
}

/// Paragraph background, used to flag "intuition" notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Default,
    Highlighted,
}

/// Discriminant of a block, tracked between siblings to detect list runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    BulletedItem,
    NumberedItem,
    Toggle,
    Code,
    Equation,
    Heading1,
    Heading2,
    Heading3,
    Image,
    Unsupported,
}

/// Kind-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockData {
    Paragraph {
        rich_text: Vec<TextRun>,
        background: Background,
    },
    BulletedItem {
        rich_text: Vec<TextRun>,
    },
    NumberedItem {
        rich_text: Vec<TextRun>,
    },
    Toggle {
        rich_text: Vec<TextRun>,
    },
    Code {
        rich_text: Vec<TextRun>,
        language: String,
    },
    Equation {
        expression: String,
    },
    /// Heading level 1, 2 or 3.
    Heading {
        level: u8,
        rich_text: Vec<TextRun>,
    },
    Image,
    Unsupported {
        type_name: String,
        fallback_text: String,
    },
}

impl BlockData {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockData::Paragraph { .. } => BlockKind::Paragraph,
            BlockData::BulletedItem { .. } => BlockKind::BulletedItem,
            BlockData::NumberedItem { .. } => BlockKind::NumberedItem,
            BlockData::Toggle { .. } => BlockKind::Toggle,
            BlockData::Code { .. } => BlockKind::Code,
            BlockData::Equation { .. } => BlockKind::Equation,
            BlockData::Heading { level: 1, .. } => BlockKind::Heading1,
            BlockData::Heading { level: 2, .. } => BlockKind::Heading2,
            BlockData::Heading { .. } => BlockKind::Heading3,
            BlockData::Image => BlockKind::Image,
            BlockData::Unsupported { .. } => BlockKind::Unsupported,
        }
    }
}

/// One node of a page's block tree.
///
/// Children are not stored inline; container blocks are expanded by asking a
/// [`BlockSource`](crate::notion::BlockSource) for the children of [`ContentBlock::id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub id: BlockId,
    pub has_children: bool,
    pub data: BlockData,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: BlockId(id.into()),
            has_children: false,
            data,
        }
    }

    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.data.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_map_to_kinds() {
        let heading = |level| BlockData::Heading {
            level,
            rich_text: vec![],
        };
        assert_eq!(heading(1).kind(), BlockKind::Heading1);
        assert_eq!(heading(2).kind(), BlockKind::Heading2);
        assert_eq!(heading(3).kind(), BlockKind::Heading3);
    }

    #[test]
    fn test_raw_text_ignores_emphasis() {
        let run = TextRun::styled("x", &[Emphasis::Bold, Emphasis::Code]);
        assert_eq!(run.raw_text(), "x");
    }
}

//! Page metadata and the per-page record handed to generation.

use serde::{Deserialize, Serialize};

use super::BlockId;

/// Entry returned by a database query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: BlockId,
}

/// Properties of one problem page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageProperties {
    pub title: String,
    pub week: u32,
    pub difficulty: Option<String>,
    pub problem_type: String,
    pub tags: Vec<String>,
    pub pdf_url: Option<String>,
}

impl PageProperties {
    /// Assemble a record from these properties and the fetched content.
    pub fn into_record(self, pdf: Option<String>, content: String) -> PageRecord {
        PageRecord {
            title: self.title,
            week: self.week,
            difficulty: self.difficulty,
            problem_type: self.problem_type,
            tags: self.tags,
            pdf_url: self.pdf_url,
            pdf,
            content,
        }
    }
}

/// Everything needed to generate a README for one page.
///
/// This is also the on-disk cache format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub week: u32,
    pub difficulty: Option<String>,
    pub problem_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub pdf_url: Option<String>,
    /// Extracted text of the problem statement PDF.
    pub pdf: Option<String>,
    /// Rendered markdown draft of the page body.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_cache_field_names() {
        let record = PageProperties {
            title: "Even Pairs".to_string(),
            week: 1,
            difficulty: None,
            problem_type: "PoW".to_string(),
            tags: vec!["prefix sums".to_string()],
            pdf_url: None,
        }
        .into_record(None, "## Solutions\n".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "Even Pairs");
        assert_eq!(json["week"], 1);
        assert_eq!(json["problem_type"], "PoW");
        assert!(json["difficulty"].is_null());
        assert!(json["pdf"].is_null());
        assert_eq!(json["content"], "## Solutions\n");
    }

    #[test]
    fn test_record_reads_cached_json() {
        let json = r#"{
          "title": "Dominoes",
          "week": 1,
          "difficulty": "Easy",
          "problem_type": "Problem",
          "tags": [],
          "pdf_url": null,
          "pdf": null,
          "content": ""
        }"#;
        let record: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.week, 1);
        assert_eq!(record.difficulty.as_deref(), Some("Easy"));
    }
}

//! Prompt templates.

use crate::model::PageRecord;

const SYSTEM_PROMPT: &str = include_str!("prompts/system.md");
const INPUT_TEMPLATE: &str = include_str!("prompts/input_template.md");
const OUTPUT_TEMPLATE: &str = include_str!("prompts/output_template.md");
const USER_TEMPLATE: &str = include_str!("prompts/user_template.md");

const PROBLEM_PLACEHOLDER: &str = "{problem_pdf}";
const DRAFT_PLACEHOLDER: &str = "{draft_markdown}";

/// Placeholder text used when a page has no problem statement PDF.
pub const NO_PDF_PLACEHOLDER: &str = "No PDF available.";

/// The instructions and templates sent to the model.
///
/// `user_template` must contain the `{problem_pdf}` and `{draft_markdown}`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub user_template: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT
                .replace("{INPUT_TEMPLATE}", INPUT_TEMPLATE.trim_end())
                .replace("{OUTPUT_TEMPLATE}", OUTPUT_TEMPLATE.trim_end()),
            user_template: USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptConfig {
    pub fn new(system_prompt: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_template: user_template.into(),
        }
    }

    /// Fill the user template with a page's problem statement and draft.
    ///
    /// Placeholders are substituted in one pass over the template, so braces
    /// inside the inserted text are never expanded.
    pub fn user_prompt(&self, record: &PageRecord) -> String {
        let problem = record.pdf.as_deref().unwrap_or(NO_PDF_PLACEHOLDER);
        let mut prompt = String::with_capacity(
            self.user_template.len() + problem.len() + record.content.len(),
        );

        let mut rest = self.user_template.as_str();
        while let Some(open) = rest.find('{') {
            prompt.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix(PROBLEM_PLACEHOLDER) {
                prompt.push_str(problem);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(DRAFT_PLACEHOLDER) {
                prompt.push_str(&record.content);
                rest = after;
            } else {
                prompt.push('{');
                rest = &tail[1..];
            }
        }
        prompt.push_str(rest);
        prompt
    }
}

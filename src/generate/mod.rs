//! README generation through a language model.
//!
//! - [`PromptConfig`]: system instructions and the per-page user template
//! - [`ModelRoute`]: how a model expects its prompt (single turn or split)
//! - [`Generator`]: the model call, implemented by [`GeminiClient`]
//! - [`strip_code_fence`], [`extract_solution`]: response cleanup

mod gemini;
mod postprocess;
mod prompts;

pub use gemini::GeminiClient;
pub use postprocess::{extract_solution, strip_code_fence};
pub use prompts::{NO_PDF_PLACEHOLDER, PromptConfig};

use crate::error::{Error, Result};
use crate::model::PageRecord;

/// Model used when none is given on the command line.
pub const DEFAULT_MODEL: &str = "gemma-3-27b-it";

/// A prompt ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// System instructions and user input in one user turn.
    Single { prompt: String },
    /// System instructions passed separately from the user turn.
    Split { system: String, user: String },
}

/// Text generation capability.
pub trait Generator {
    fn generate(&self, model: &str, request: &GenerationRequest) -> Result<String>;
}

/// How a model family takes its prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRoute {
    /// Gemma has no system role.
    SinglePrompt,
    /// Gemini takes a system instruction.
    SystemSplit,
}

impl ModelRoute {
    /// Pick the route by model family name.
    pub fn for_model(model: &str) -> Result<Self> {
        let name = model.to_lowercase();
        if name.contains("gemma") {
            Ok(ModelRoute::SinglePrompt)
        } else if name.contains("gemini") {
            Ok(ModelRoute::SystemSplit)
        } else {
            Err(Error::UnsupportedModel(model.to_string()))
        }
    }

    /// Build the request for one page.
    pub fn request(self, prompts: &PromptConfig, record: &PageRecord) -> GenerationRequest {
        let user = prompts.user_prompt(record);
        match self {
            ModelRoute::SinglePrompt => GenerationRequest::Single {
                prompt: format!("{}\n{}", prompts.system_prompt, user),
            },
            ModelRoute::SystemSplit => GenerationRequest::Split {
                system: prompts.system_prompt.clone(),
                user,
            },
        }
    }
}

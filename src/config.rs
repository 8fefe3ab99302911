//! Pipeline configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::markdown::DEFAULT_NOTES_LABEL;

/// Where pages are cached and READMEs written, and which section is private.
///
/// Every field may be overridden from a TOML file; absent keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of cached page records.
    pub cache_dir: PathBuf,
    /// Root under which `Week_NN/<title>/` directories are created.
    pub output_dir: PathBuf,
    /// Heading of the page section excluded from rendering.
    pub notes_label: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            output_dir: PathBuf::from(".."),
            notes_label: DEFAULT_NOTES_LABEL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load overrides from `config_path`, or the defaults if the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|source| Error::Config {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Directory holding one page's README and solution.
    pub fn page_dir(&self, title: &str, week: u32) -> PathBuf {
        self.output_dir
            .join(format!("Week_{week:02}"))
            .join(title.replace(' ', "_"))
    }
}

//! Page preparation and README generation.
//!
//! The pipeline runs in two passes, one page at a time:
//!
//! 1. [`PageBuilder`] turns each database entry into a [`PageRecord`]: from the
//!    cache when present, otherwise by rendering the page and extracting its
//!    problem PDF, then caching the result.
//! 2. [`ReadmeWriter`] sends each record to the model and writes `README.md`
//!    and `solution.cpp`, skipping pages whose README already exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cache::{PageCache, load_record};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::generate::{
    Generator, ModelRoute, PromptConfig, extract_solution, strip_code_fence,
};
use crate::markdown::render_page;
use crate::model::{PageRecord, PageSummary};
use crate::notion::DocumentStore;
use crate::pdf::PdfSource;

pub const README_FILE: &str = "README.md";
pub const SOLUTION_FILE: &str = "solution.cpp";

/// A page record and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub record: PageRecord,
    pub from_cache: bool,
}

/// Builds page records from the document store, through the cache.
pub struct PageBuilder<'a, D: ?Sized, P: ?Sized> {
    store: &'a D,
    pdfs: &'a P,
    cache: PageCache,
    notes_label: &'a str,
}

impl<'a, D, P> PageBuilder<'a, D, P>
where
    D: DocumentStore + ?Sized,
    P: PdfSource + ?Sized,
{
    pub fn new(store: &'a D, pdfs: &'a P, config: &'a PipelineConfig) -> Self {
        Self {
            store,
            pdfs,
            cache: PageCache::new(&config.cache_dir),
            notes_label: &config.notes_label,
        }
    }

    /// Entries of the problem database, in title order.
    pub fn list_pages(&self, database_id: &str) -> Result<Vec<PageSummary>> {
        self.store.query_database(database_id)
    }

    /// Build the record for one page.
    ///
    /// A cached record short-circuits all rendering and PDF work.
    pub fn prepare(&self, page: &PageSummary) -> Result<Prepared> {
        let props = self.store.page_properties(&page.id)?;

        if let Some(record) = self.cache.load(&props.title)? {
            info!(
                title = %props.title,
                week = props.week,
                problem_type = %props.problem_type,
                "loaded cached page"
            );
            return Ok(Prepared {
                record,
                from_cache: true,
            });
        }

        info!(
            title = %props.title,
            week = props.week,
            problem_type = %props.problem_type,
            "processing page"
        );

        let content = render_page(self.store, &page.id, self.notes_label)?;
        let pdf = props
            .pdf_url
            .as_deref()
            .map(|url| self.pdfs.fetch_text(url))
            .transpose()?;

        let record = props.into_record(pdf, content);
        self.cache.store(&record)?;

        Ok(Prepared {
            record,
            from_cache: false,
        })
    }
}

/// Result of asking for one README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated {
        readme: PathBuf,
        solution: Option<PathBuf>,
    },
    /// The README already existed and was left alone.
    Skipped { readme: PathBuf },
}

/// Generates READMEs with a model and writes them to the output tree.
pub struct ReadmeWriter<'a, G: ?Sized> {
    generator: &'a G,
    prompts: &'a PromptConfig,
    config: &'a PipelineConfig,
    model: String,
    route: ModelRoute,
}

impl<'a, G: Generator + ?Sized> ReadmeWriter<'a, G> {
    /// Fails if `model` belongs to no supported family.
    pub fn new(
        generator: &'a G,
        prompts: &'a PromptConfig,
        config: &'a PipelineConfig,
        model: &str,
    ) -> Result<Self> {
        Ok(Self {
            generator,
            prompts,
            config,
            model: model.to_string(),
            route: ModelRoute::for_model(model)?,
        })
    }

    /// Generate the README for `record` unless it already exists.
    pub fn write(&self, record: &PageRecord) -> Result<Outcome> {
        let dir = self.config.page_dir(&record.title, record.week);
        let readme = dir.join(README_FILE);

        if readme.exists() {
            info!(title = %record.title, week = record.week, "README already exists, skipping");
            return Ok(Outcome::Skipped { readme });
        }

        self.generate_into(record, &dir)
    }

    /// Regenerate one page from a cache file.
    ///
    /// When the README exists, `confirm` is asked whether to overwrite it; on
    /// yes the README and solution are removed first.
    pub fn rewrite_cached<F>(&self, cache_file: &Path, confirm: F) -> Result<Outcome>
    where
        F: FnOnce(&Path) -> Result<bool>,
    {
        let record = load_record(cache_file)?;
        let dir = self.config.page_dir(&record.title, record.week);
        let readme = dir.join(README_FILE);

        if readme.exists() {
            if !confirm(&readme)? {
                return Ok(Outcome::Skipped { readme });
            }
            remove_if_exists(&readme)?;
            remove_if_exists(&dir.join(SOLUTION_FILE))?;
        }

        self.generate_into(&record, &dir)
    }

    fn generate_into(&self, record: &PageRecord, dir: &Path) -> Result<Outcome> {
        info!(
            title = %record.title,
            week = record.week,
            problem_type = %record.problem_type,
            model = %self.model,
            "generating README"
        );

        let request = self.route.request(self.prompts, record);
        let response = self.generator.generate(&self.model, &request)?;
        let text = strip_code_fence(&response);

        fs::create_dir_all(dir)?;
        let readme = dir.join(README_FILE);
        fs::write(&readme, text)?;

        let solution = match extract_solution(text) {
            Some(code) => {
                let path = dir.join(SOLUTION_FILE);
                fs::write(&path, code)?;
                Some(path)
            }
            None => None,
        };

        Ok(Outcome::Generated { readme, solution })
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

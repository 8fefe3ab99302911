//! scribe - README generator for Notion problem pages

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notion_scribe::generate::DEFAULT_MODEL;
use notion_scribe::{
    GeminiClient, HttpPdfSource, NotionClient, Outcome, PageBuilder, PipelineConfig, PromptConfig,
    ReadmeWriter, Result,
};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(version, about = "Generate README walkthroughs from Notion problem pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    scribe                                  Render, cache and generate every page
    scribe --model gemini-2.5-pro           Generate with a Gemini model
    scribe --cached-page cache/Even_Pairs.json
                                            Regenerate one page from its cache file")]
struct Cli {
    /// Model used for generation (gemma-* or gemini-*)
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Regenerate a single page from its cache file
    #[arg(long, value_name = "PATH")]
    cached_page: Option<PathBuf>,

    /// Optional TOML file overriding cache/output directories and the notes label
    #[arg(long, value_name = "PATH", default_value = "scribe.toml")]
    config: PathBuf,

    /// Notion integration token
    #[arg(
        long,
        env = "NOTION_INTEGRATION_TOKEN",
        hide_env_values = true,
        required_unless_present = "cached_page"
    )]
    notion_token: Option<String>,

    /// Notion database holding the problem pages
    #[arg(long, env = "NOTION_DATABASE_ID", required_unless_present = "cached_page")]
    database_id: Option<String>,

    /// Google generative-language API key
    #[arg(long, env = "GOOGLE_GENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notion_scribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.cached_page.as_deref() {
        Some(path) => regenerate(&cli, path),
        None => run(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (Some(token), Some(database_id)) = (cli.notion_token.as_deref(), cli.database_id.as_deref())
    else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "--notion-token and --database-id are required unless --cached-page is given",
            )
            .exit();
    };

    let config = PipelineConfig::load_from_path(&cli.config)?;
    let prompts = PromptConfig::default();

    let notion = NotionClient::new(token);
    let pdfs = HttpPdfSource::new();
    let gemini = GeminiClient::new(&cli.api_key);

    let builder = PageBuilder::new(&notion, &pdfs, &config);
    let writer = ReadmeWriter::new(&gemini, &prompts, &config, &cli.model)?;

    let entries = builder.list_pages(database_id)?;

    let bar = progress_bar(entries.len(), "Parsing Notion pages", cli.quiet);
    let mut records = Vec::with_capacity(entries.len());
    for entry in &entries {
        records.push(step(&bar, || builder.prepare(entry))?.record);
    }
    bar.finish();

    let bar = progress_bar(records.len(), "Generating READMEs", cli.quiet);
    let mut generated = 0;
    for record in &records {
        if let Outcome::Generated { .. } = step(&bar, || writer.write(record))? {
            generated += 1;
        }
    }
    bar.finish();

    if !cli.quiet {
        println!(
            "Generated {generated} README(s), {} already present",
            records.len() - generated
        );
    }

    Ok(())
}

fn regenerate(cli: &Cli, cache_file: &Path) -> Result<()> {
    let config = PipelineConfig::load_from_path(&cli.config)?;
    let prompts = PromptConfig::default();
    let gemini = GeminiClient::new(&cli.api_key);
    let writer = ReadmeWriter::new(&gemini, &prompts, &config, &cli.model)?;

    match writer.rewrite_cached(cache_file, ask_overwrite)? {
        Outcome::Generated { readme, solution } => {
            if !cli.quiet {
                println!("Wrote {}", readme.display());
                if let Some(solution) = solution {
                    println!("Wrote {}", solution.display());
                }
            }
        }
        Outcome::Skipped { readme } => {
            if !cli.quiet {
                println!("Kept existing {}", readme.display());
            }
        }
    }

    Ok(())
}

fn ask_overwrite(readme: &Path) -> Result<bool> {
    print!("File '{}' already exists. Overwrite? (y/n): ", readme.display());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Run one page of work with the bar hidden, so log lines written meanwhile
/// are not torn by redraws, then advance the bar.
fn step<T>(bar: &ProgressBar, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let value = bar.suspend(work)?;
    bar.inc(1);
    Ok(value)
}

fn progress_bar(len: usize, message: &'static str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message);
    bar
}

//! Problem statement PDFs: download and text extraction.

use lopdf::Document;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{Error, FetchFailure, Result};

/// Source of a problem statement's text.
pub trait PdfSource {
    /// Fetch the document at `url` and return its text.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Downloads PDFs over HTTP and extracts their text.
#[derive(Debug, Clone, Default)]
pub struct HttpPdfSource {
    http: Client,
}

impl HttpPdfSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PdfSource for HttpPdfSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(%url, "downloading problem PDF");
        let response = self.http.get(url).send()?;
        let status = response.status();
        let bytes = response.bytes()?;

        check_body(url, status, &bytes)?;
        extract_text(&bytes)
    }
}

/// Reject a download that failed or came back empty.
pub fn check_body(url: &str, status: StatusCode, bytes: &[u8]) -> Result<()> {
    let reason = if !status.is_success() {
        FetchFailure::Status(status.as_u16())
    } else if bytes.is_empty() {
        FetchFailure::EmptyBody
    } else {
        return Ok(());
    };

    Err(Error::FetchFailed {
        url: url.to_string(),
        reason,
    })
}

/// Extract the text of every page, pages separated by a blank line.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc
        .get_pages()
        .into_keys()
        .map(|number| doc.extract_text(&[number]))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(join_pages(&pages))
}

/// Join per-page text with a blank line between pages.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n\n")
}

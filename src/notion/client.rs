//! Blocking Notion API client.

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::{Error, FetchFailure, Result};
use crate::model::{BlockId, ContentBlock, PageProperties, PageSummary};

use super::wire::{Paginated, RawBlock, RawPage, RawPageRef, decode_block, decode_properties};
use super::{BlockSource, DocumentStore};

/// Client for the Notion REST API.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    token: String,
    base_url: String,
}

impl NotionClient {
    pub const API_BASE: &'static str = "https://api.notion.com/v1";
    pub const API_VERSION: &'static str = "2022-06-28";
    const PAGE_SIZE: &'static str = "100";

    /// Create a client authenticated with an integration token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: Self::API_BASE.to_string(),
        }
    }

    /// Point the client at another endpoint (a proxy or a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", Self::API_VERSION)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: FetchFailure::Status(status.as_u16()),
            });
        }

        Ok(response.json()?)
    }
}

/// Collect every page of a cursor-paginated listing.
///
/// `fetch` gets the cursor of the page to load, `None` for the first one.
/// Listing stops at the first page without `has_more` or without a cursor.
fn collect_pages<T, F>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<&str>) -> Result<Paginated<T>>,
{
    let mut results = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch(cursor.as_deref())?;
        results.extend(page.results);
        match page.next_cursor {
            Some(next) if page.has_more => cursor = Some(next),
            _ => break,
        }
    }

    Ok(results)
}

impl BlockSource for NotionClient {
    fn children(&self, id: &BlockId) -> Result<Vec<ContentBlock>> {
        let url = format!("{}/blocks/{}/children", self.base_url, id);
        debug!(block_id = %id, "fetching block children");

        let raw: Vec<RawBlock> = collect_pages(|cursor| {
            let mut query = vec![("page_size", Self::PAGE_SIZE)];
            if let Some(cursor) = cursor {
                query.push(("start_cursor", cursor));
            }
            self.send(self.http.get(&url).query(&query), &url)
        })?;

        raw.into_iter().map(decode_block).collect()
    }
}

impl DocumentStore for NotionClient {
    fn query_database(&self, database_id: &str) -> Result<Vec<PageSummary>> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);

        let raw: Vec<RawPageRef> = collect_pages(|cursor| {
            let mut body = json!({
                "sorts": [{ "property": "Name", "direction": "ascending" }],
            });
            if let Some(cursor) = cursor {
                body["start_cursor"] = json!(cursor);
            }
            self.send(self.http.post(&url).json(&body), &url)
        })?;

        Ok(raw.into_iter().map(PageSummary::from).collect())
    }

    fn page_properties(&self, page_id: &BlockId) -> Result<PageProperties> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        let raw: RawPage = self.send(self.http.get(&url), &url)?;
        decode_properties(raw)
    }
}

//! Zotero publications API client.
//!
//! Issues a single GET against
//! `https://api.zotero.org/users/{id}/publications/items`, either as JSON
//! items (formatted locally by the citation module) or as server-rendered
//! bibliography HTML (`format=bib`). One best-effort attempt per call: no
//! retries, no caching, no pagination beyond the fixed page size.

use crate::record::{records_from_value, BibRecord, RecordError};
use thiserror::Error;

const API_BASE: &str = "https://api.zotero.org/users";

/// Default item-type filter, as the publications page queried it.
pub const DEFAULT_ITEM_TYPES: &str = "journalArticle || Report";

/// Errors that can occur when talking to the API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API request failed with status {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("Invalid payload: {0}")]
    Payload(#[from] RecordError),
}

/// Query parameters for a publications request.
///
/// Defaults mirror the upstream page: journal articles and reports,
/// newest first, one page of 100 items.
#[derive(Debug, Clone)]
pub struct PubQuery {
    /// Numeric Zotero user ID.
    pub user_id: String,
    /// Item-type filter expression (e.g. `"journalArticle || Report"`).
    pub item_types: String,
    /// Sort field.
    pub sort: String,
    /// Sort direction, `asc` or `desc`.
    pub direction: String,
    /// Page size; the API caps this at 100.
    pub limit: u32,
    /// Optional free-text filter. The upstream page used it to narrow
    /// results to a single year.
    pub q: Option<String>,
}

impl PubQuery {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            item_types: DEFAULT_ITEM_TYPES.to_string(),
            sort: "date".to_string(),
            direction: "desc".to_string(),
            limit: 100,
            q: None,
        }
    }

    /// Narrows the query to one publication year via the free-text filter.
    pub fn with_year(mut self, year: i32) -> Self {
        self.q = Some(year.to_string());
        self
    }

    /// URL of the publications collection for this user.
    pub fn items_url(&self) -> String {
        format!("{}/{}/publications/items", API_BASE, self.user_id)
    }

    /// Query pairs shared by both response formats.
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("itemType", self.item_types.clone()),
            ("sort", self.sort.clone()),
            ("direction", self.direction.clone()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        params
    }

    /// Query pairs for the JSON items request.
    pub fn json_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("format", "json".to_string())];
        params.extend(self.base_params());
        params
    }

    /// Query pairs for the server-rendered bibliography request.
    pub fn bib_params(&self, style: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "bib".to_string()),
            ("style", style.to_string()),
            ("linkwrap", "1".to_string()),
        ];
        params.extend(self.base_params());
        params
    }
}

/// Fetches one page of publication records as JSON items.
///
/// Each item's `data` envelope is unwrapped; record order is the API's
/// response order (controlled by `sort`/`direction`).
pub fn fetch_publications(query: &PubQuery) -> Result<Vec<BibRecord>, FetchError> {
    let response = send(query.items_url(), query.json_params())?;
    let value: serde_json::Value = response.into_json()?;
    Ok(records_from_value(value)?)
}

/// Fetches one page of publications as server-rendered bibliography HTML.
///
/// Pass-through mode: the returned string is the API's formatted
/// bibliography (e.g. APA style with wrapped links), emitted verbatim.
pub fn fetch_bibliography(query: &PubQuery, style: &str) -> Result<String, FetchError> {
    let response = send(query.items_url(), query.bib_params(style))?;
    Ok(response.into_string()?)
}

fn send(
    url: String,
    params: Vec<(&'static str, String)>,
) -> Result<ureq::Response, FetchError> {
    let mut request = ureq::get(&url);
    for (name, value) in &params {
        request = request.query(name, value);
    }
    request.call().map_err(|e| match e {
        ureq::Error::Status(code, _) => FetchError::Status(code),
        ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
    })
}

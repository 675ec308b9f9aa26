//! zotpub: fetch and render Zotero publication lists as HTML.
//!
//! This library provides functionality to:
//! - Load publication records from Zotero API payloads (JSON or JSONL)
//! - Format each record into an APA-like citation string
//! - Render citations as an HTML publication list with per-year sections
//! - Fetch a user's publications from the Zotero API

pub mod citation;
pub mod fetch;
pub mod output;
pub mod record;

pub use citation::{format_all, format_citation, format_creators, format_year};
pub use fetch::{fetch_bibliography, fetch_publications, FetchError, PubQuery};
pub use output::{render_bare, render_document, render_list, render_section};
pub use record::{load_records, parse_records, BibRecord, Creator, RecordError};

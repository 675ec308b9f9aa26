//! Shared test constants and helpers for integration tests.

/// A realistic two-item Zotero API payload, newest first, with `data`
/// envelopes and the extra API bookkeeping fields the formatter ignores.
pub const SAMPLE_PAYLOAD: &str = r#"[
  {
    "key": "ABCD1234",
    "version": 312,
    "data": {
      "key": "ABCD1234",
      "itemType": "journalArticle",
      "title": "A Study",
      "creators": [
        {"creatorType": "author", "firstName": "Jane", "lastName": "Smith"},
        {"creatorType": "author", "firstName": "John", "lastName": "Doe"}
      ],
      "date": "2022-05-01",
      "publicationTitle": "Journal X",
      "url": "http://example.com"
    }
  },
  {
    "key": "EFGH5678",
    "version": 298,
    "data": {
      "key": "EFGH5678",
      "itemType": "report",
      "title": "Report Y",
      "creators": [
        {"creatorType": "author", "firstName": "Ana", "lastName": "Lee"}
      ],
      "date": "2021-01-01",
      "institution": "Institute Z"
    }
  }
]"#;

/// Build a JSON payload of API items from a list of titles.
///
/// Each item gets an auto-generated author (`AuthorX` where X is the last
/// char of the title) and is dated 2020.
#[allow(dead_code)]
pub fn build_payload(titles: &[&str]) -> String {
    let items: Vec<String> = titles
        .iter()
        .map(|title| {
            format!(
                r#"{{"key": "K{}", "data": {{"itemType": "journalArticle", "title": "{}", "creators": [{{"creatorType": "author", "lastName": "Author{}"}}], "date": "2020-01-01"}}}}"#,
                title.len(),
                title,
                title.chars().last().unwrap_or('X'),
            )
        })
        .collect();
    format!("[{}]", items.join(", "))
}

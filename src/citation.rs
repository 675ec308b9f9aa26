//! Record-to-citation formatting.
//!
//! Turns one [`BibRecord`] into one human-readable citation string in an
//! APA-like layout: `Creators (Year). Title. Venue. Institution. Extra.`
//! The title is rendered as a hyperlink when the record carries a URL.
//!
//! The whole module is a pure transformation layer: no state, no errors,
//! input order preserved. Ordering of the records themselves (e.g. newest
//! first) is the responsibility of the upstream query.

use crate::record::{BibRecord, Creator};
use regex::Regex;

/// Extracts the publication year from a loosely-formatted date string.
///
/// Zotero dates come back in whatever shape the library owner typed
/// ("2022-05-01", "May 2022", "2022"), so this scans for the first
/// standalone four-digit number rather than committing to one format.
///
/// Returns `None` when no year can be found.
pub fn format_year(date: &str) -> Option<i32> {
    let year_re = Regex::new(r"\b(\d{4})\b").unwrap();
    year_re
        .captures(date)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Joins creator last names with `", "`, in original order.
///
/// Creators with a missing or empty last name contribute an empty token —
/// nothing is dropped, nothing fails. Returns the empty string for an
/// empty sequence.
pub fn format_creators(creators: &[Creator]) -> String {
    creators
        .iter()
        .map(|c| c.last_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats one record as a citation string.
///
/// Layout, in this exact order and punctuation:
///
/// ```text
/// Creators (Year). Title. PublicationTitle. Institution. Extra.
/// ```
///
/// - the year slot renders the literal `NaN` when the date is unparseable,
///   matching what the upstream page displayed;
/// - with a non-empty `url`, the title becomes
///   `<a href="URL" target="_blank"><i>Title</i></a>`;
/// - each optional trailing segment appears only when its field is a
///   non-empty string (an empty string drops the segment, same as the
///   truthy check upstream).
pub fn format_citation(record: &BibRecord) -> String {
    let year = match format_year(&record.date) {
        Some(y) => y.to_string(),
        None => "NaN".to_string(),
    };

    let title = match present(&record.url) {
        Some(url) => format!(
            r#"<a href="{}" target="_blank"><i>{}</i></a>"#,
            url, record.title
        ),
        None => record.title.clone(),
    };

    let mut citation = format!(
        "{} ({}). {}",
        format_creators(&record.creators),
        year,
        title
    );

    for field in [
        &record.publication_title,
        &record.institution,
        &record.extra,
    ] {
        if let Some(value) = present(field) {
            citation.push_str(". ");
            citation.push_str(value);
        }
    }

    citation.push('.');
    citation
}

/// Formats a sequence of records, one citation per record.
///
/// Guarantees a 1:1 mapping: output length equals input length, in input
/// order, with no filtering or deduplication.
pub fn format_all(records: &[BibRecord]) -> Vec<String> {
    records.iter().map(format_citation).collect()
}

/// Presence check for optional fields: present means a non-empty string.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BibRecord {
        BibRecord {
            creators: vec![Creator::new("Smith"), Creator::new("Doe")],
            date: "2022-05-01".to_string(),
            title: "A Study".to_string(),
            publication_title: Some("Journal X".to_string()),
            institution: None,
            extra: None,
            url: Some("http://example.com".to_string()),
        }
    }

    // ===========================================
    // Tests for format_year
    // ===========================================

    #[test]
    fn test_format_year_iso_date() {
        assert_eq!(format_year("2022-05-01"), Some(2022));
    }

    #[test]
    fn test_format_year_free_text() {
        assert_eq!(format_year("May 2022"), Some(2022));
        assert_eq!(format_year("2021"), Some(2021));
    }

    #[test]
    fn test_format_year_unparseable() {
        assert_eq!(format_year(""), None);
        assert_eq!(format_year("in press"), None);
        // five digits is not a year
        assert_eq!(format_year("12345"), None);
    }

    // ===========================================
    // Tests for format_creators
    // ===========================================

    #[test]
    fn test_format_creators_joins_with_comma_space() {
        // Given: n creators
        let creators = vec![
            Creator::new("Smith"),
            Creator::new("Doe"),
            Creator::new("Lee"),
        ];

        // When: we format them
        let result = format_creators(&creators);

        // Then: we get n-1 separators, original order
        assert_eq!(result, "Smith, Doe, Lee");
        assert_eq!(result.matches(", ").count(), creators.len() - 1);
    }

    #[test]
    fn test_format_creators_empty_sequence() {
        assert_eq!(format_creators(&[]), "");
    }

    #[test]
    fn test_format_creators_keeps_empty_names() {
        // Given: a creator with no last name between two named ones
        let creators = vec![Creator::new("Smith"), Creator::new(""), Creator::new("Lee")];

        // When: we format them
        let result = format_creators(&creators);

        // Then: the empty token is kept, not filtered
        assert_eq!(result, "Smith, , Lee");
    }

    // ===========================================
    // Tests for format_citation
    // ===========================================

    #[test]
    fn test_format_citation_full_record_with_url() {
        // Given: the worked example with a URL and a journal
        let result = format_citation(&record());

        // Then: exact output, anchor wrapping an italicized title
        assert_eq!(
            result,
            r#"Smith, Doe (2022). <a href="http://example.com" target="_blank"><i>A Study</i></a>. Journal X."#
        );
    }

    #[test]
    fn test_format_citation_minimal_record() {
        // Given: a record with only required fields
        let record = BibRecord {
            creators: vec![Creator::new("Lee")],
            date: "2021-01-01".to_string(),
            title: "Report Y".to_string(),
            ..Default::default()
        };

        // Then: no anchor, no optional segments
        assert_eq!(format_citation(&record), "Lee (2021). Report Y.");
    }

    #[test]
    fn test_format_citation_empty_creators() {
        // Given: an empty creator sequence
        let record = BibRecord {
            creators: vec![],
            date: "2020-01-01".to_string(),
            title: "T".to_string(),
            ..Default::default()
        };

        // Then: the leading space from the empty join is preserved verbatim
        assert_eq!(format_citation(&record), " (2020). T.");
    }

    #[test]
    fn test_format_citation_unparseable_date_renders_nan() {
        // Given: a date the year scan cannot handle
        let record = BibRecord {
            creators: vec![Creator::new("Lee")],
            date: "forthcoming".to_string(),
            title: "T".to_string(),
            ..Default::default()
        };

        // Then: the sentinel passes through into the output
        assert_eq!(format_citation(&record), "Lee (NaN). T.");
    }

    #[test]
    fn test_format_citation_no_url_means_bare_title() {
        let mut record = record();
        record.url = None;

        let result = format_citation(&record);

        assert!(result.contains("A Study"));
        assert!(!result.contains("<a "));
        assert!(!result.contains("<i>"));
    }

    #[test]
    fn test_format_citation_optional_segment_order() {
        // Given: all three optional tail fields present
        let record = BibRecord {
            creators: vec![Creator::new("Lee")],
            date: "2021".to_string(),
            title: "T".to_string(),
            publication_title: Some("Journal X".to_string()),
            institution: Some("Institute Z".to_string()),
            extra: Some("Preprint".to_string()),
            url: None,
        };

        // When: we format it
        let result = format_citation(&record);

        // Then: segments appear in fixed order, each preceded by ". "
        assert_eq!(result, "Lee (2021). T. Journal X. Institute Z. Preprint.");
    }

    #[test]
    fn test_format_citation_empty_string_drops_segment() {
        // Given: an institution that is present but empty
        let record = BibRecord {
            creators: vec![Creator::new("Lee")],
            date: "2021".to_string(),
            title: "T".to_string(),
            institution: Some(String::new()),
            ..Default::default()
        };

        // Then: the segment and its separator are omitted entirely
        assert_eq!(format_citation(&record), "Lee (2021). T.");
    }

    #[test]
    fn test_format_citation_is_idempotent() {
        let record = record();
        assert_eq!(format_citation(&record), format_citation(&record));
    }

    // ===========================================
    // Tests for format_all
    // ===========================================

    #[test]
    fn test_format_all_preserves_length_and_order() {
        // Given: three records in a fixed order
        let records = vec![
            BibRecord {
                title: "First".to_string(),
                date: "2022".to_string(),
                ..Default::default()
            },
            BibRecord {
                title: "Second".to_string(),
                date: "2021".to_string(),
                ..Default::default()
            },
            BibRecord {
                title: "Third".to_string(),
                date: "2020".to_string(),
                ..Default::default()
            },
        ];

        // When: we format them all
        let citations = format_all(&records);

        // Then: 1:1 mapping, index-aligned with format_citation
        assert_eq!(citations.len(), records.len());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(citations[i], format_citation(record));
        }
    }

    #[test]
    fn test_format_all_empty_input() {
        assert!(format_all(&[]).is_empty());
    }

    #[test]
    fn test_format_all_keeps_duplicates() {
        // Given: the same record twice
        let record = record();
        let records = vec![record.clone(), record];

        // When: we format them
        let citations = format_all(&records);

        // Then: no deduplication
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0], citations[1]);
    }
}

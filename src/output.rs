//! HTML output generation for formatted citations.
//!
//! This module is the rendering collaborator: it takes the citation strings
//! produced by the formatter and wraps them into list items, per-year
//! sections, and the final document. Citation strings are inserted as-is
//! (they may already contain anchor markup).

/// Renders citations as an HTML unordered list, one `<li>` per citation.
///
/// Returns the empty string for an empty sequence.
pub fn render_list(citations: &[String]) -> String {
    if citations.is_empty() {
        return String::new();
    }

    let mut output = String::from("<ul class=\"publications\">\n");
    for citation in citations {
        output.push_str("  <li>");
        output.push_str(citation);
        output.push_str("</li>\n");
    }
    output.push_str("</ul>");

    output
}

/// Renders citations as plain text, one per line, no HTML wrapper.
pub fn render_bare(citations: &[String]) -> String {
    citations.join("\n")
}

/// Wraps rendered body content in a section with a heading.
///
/// Used for the per-year sections of a publications page
/// (`<h2>2022</h2>` followed by that year's list).
pub fn render_section(heading: &str, body: &str) -> String {
    format!("<h2>{}</h2>\n{}", heading, body)
}

/// Joins rendered sections into the final document.
pub fn render_document(sections: &[String]) -> String {
    sections.join("\n\n")
}

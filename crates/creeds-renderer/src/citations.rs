//! Scripture citation blocks shared by every shape.

use creeds_store::{Label, Verses};

use crate::node::Element;

/// Class hook on each citation block.
pub const CITATION_CLASS: &str = "scripture-citation";

/// Render the citation blocks for a question, section or article.
///
/// - a list renders one block per citation;
/// - a mapping renders one block per label, as `"<label>: <verses>"`;
/// - no verses render nothing.
pub fn render_citations(verses: Option<&Verses>) -> Vec<Element> {
    match verses {
        None => Vec::new(),
        Some(Verses::List(citations)) => citations
            .iter()
            .map(|c| citation_block([c.clone()]))
            .collect(),
        Some(Verses::Map(map)) => map
            .iter()
            .map(|(label, verses)| citation_block([labelled_line(label, verses)]))
            .collect(),
    }
}

/// Render the citations of a confession article.
///
/// Same as [`render_citations`] for mappings; a list is grouped into a single
/// block with one line per citation.
pub fn render_article_citations(verses: Option<&Verses>) -> Vec<Element> {
    match verses {
        Some(Verses::List(citations)) => vec![citation_block(citations.iter().cloned())],
        other => render_citations(other),
    }
}

fn citation_block(lines: impl IntoIterator<Item = String>) -> Element {
    Element::new("div")
        .class(CITATION_CLASS)
        .children(lines.into_iter().map(|line| Element::new("p").text(line)))
}

/// `"<label>: <v1>,<v2>"`, matching how the verses read in the source.
fn labelled_line(label: &str, verses: &[Label]) -> String {
    let joined = verses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{label}: {joined}")
}

//! Shape dispatch: picks the renderer for a record.

use creeds_store::{CatechismBody, Record};

use crate::shapes::{
    RenderFn, RenderOptions, Rendered, render_catechism, render_confession, render_creed,
    render_document, render_lords_day_catechism, render_not_found,
};

/// Rendering strategy for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Creed,
    Confession,
    /// Catechism grouped by Lord's Day.
    LordsDayCatechism,
    /// Catechism with a flat question list.
    Catechism,
    Document,
    /// Unrecognized record type; renders the placeholder.
    NotFound,
}

impl Shape {
    /// Classify a record. Total over every [`Record`] variant.
    pub fn of(record: &Record) -> Self {
        match record {
            Record::Creed(_) => Self::Creed,
            Record::Confession(_) => Self::Confession,
            Record::Catechism(catechism) => match catechism.body {
                CatechismBody::Days { .. } => Self::LordsDayCatechism,
                CatechismBody::Questions { .. } => Self::Catechism,
            },
            Record::Document(_) => Self::Document,
            Record::Unrecognized { .. } => Self::NotFound,
        }
    }

    pub fn renderer(self) -> RenderFn {
        match self {
            Self::Creed => render_creed,
            Self::Confession => render_confession,
            Self::LordsDayCatechism => render_lords_day_catechism,
            Self::Catechism => render_catechism,
            Self::Document => render_document,
            Self::NotFound => render_not_found,
        }
    }
}

/// Select the renderer for a record.
pub fn select_renderer(record: &Record) -> RenderFn {
    Shape::of(record).renderer()
}

/// Render a record with the renderer its shape selects.
///
/// # Example
///
/// ```
/// use creeds_renderer::{render, RenderOptions};
/// use creeds_store::Record;
///
/// let record = Record::from_json(
///     r#"{"type": "creed", "name": "apostles-creed", "text": "I believe..."}"#,
/// )
/// .unwrap();
/// let html = render(&record, &RenderOptions::default()).to_html();
/// assert!(html.contains("<h1>Apostles Creed</h1>"));
/// ```
pub fn render(record: &Record, options: &RenderOptions) -> Rendered {
    select_renderer(record)(record, options)
}

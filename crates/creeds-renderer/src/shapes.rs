//! Shape-specific renderers.
//!
//! Each renderer walks one record variant recursively and returns the page
//! body as an [`Element`] tree. Renderers are pure: the same record and
//! options always produce the same tree. Numbers shown in headings come from
//! the record's own `number` fields.

use creeds_store::{
    Article, CatechismBody, Chapter, ChapterBody, Day, DocumentEntry, Label, Question, Record,
};

use crate::citations::{render_article_citations, render_citations};
use crate::node::Element;
use crate::title::title_case;

/// Class hook on the root of every rendered document.
pub const ROOT_CLASS: &str = "confession";

/// Options shared by all renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Document names whose bare-string entries get a "Thesis N" heading.
    pub thesis_documents: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            thesis_documents: vec!["Martin Luther's 95 theses".to_owned()],
        }
    }
}

/// Result of rendering a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The rendered document body.
    Page(Element),
    /// No renderer applies to the record.
    NotFound,
}

impl Rendered {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// The page body, or the "not found" placeholder.
    pub fn into_element(self) -> Element {
        match self {
            Self::Page(element) => element,
            Self::NotFound => Element::new("div").text("Page not Found"),
        }
    }

    pub fn to_html(&self) -> String {
        self.clone().into_element().to_html()
    }
}

/// Signature shared by every shape renderer.
pub type RenderFn = fn(&Record, &RenderOptions) -> Rendered;

/// Title heading plus the publication year when known.
fn header(name: &str, year: Option<&Label>) -> Vec<Element> {
    let mut nodes = vec![Element::new("h1").text(title_case(name))];
    if let Some(year) = year {
        nodes.push(Element::new("h2").text(year.to_string()));
    }
    nodes
}

fn paragraph(text: &str) -> Element {
    Element::new("p").text(text)
}

pub(crate) fn render_creed(record: &Record, _options: &RenderOptions) -> Rendered {
    let Record::Creed(creed) = record else {
        return Rendered::NotFound;
    };
    Rendered::Page(
        Element::new("div")
            .class(ROOT_CLASS)
            .child(Element::new("h1").text(title_case(&creed.name)))
            .child(paragraph(&creed.text)),
    )
}

pub(crate) fn render_confession(record: &Record, _options: &RenderOptions) -> Rendered {
    let Record::Confession(confession) = record else {
        return Rendered::NotFound;
    };
    Rendered::Page(
        Element::new("div")
            .class(ROOT_CLASS)
            .children(header(&confession.name, record.publication_year()))
            .child(
                Element::new("div")
                    .class("confession-chapters")
                    .children(confession.chapters.iter().map(render_chapter)),
            ),
    )
}

fn render_chapter(chapter: &Chapter) -> Element {
    let heading = Element::new("h3").text(format!("Chapter {}: {}", chapter.number, chapter.name));
    let section = Element::new("div").class("confession-chapter").child(heading);
    match &chapter.body {
        ChapterBody::Text { text } => section.child(paragraph(text)),
        ChapterBody::Articles { articles } => section.children(articles.iter().map(render_article)),
    }
}

fn render_article(article: &Article) -> Element {
    Element::new("div")
        .class("confession-chapter__article")
        .child(Element::new("h4").text(format!("Article {}", article.number)))
        .child(paragraph(&article.text))
        .children(render_article_citations(article.verses.as_ref()))
}

pub(crate) fn render_lords_day_catechism(record: &Record, _options: &RenderOptions) -> Rendered {
    let Record::Catechism(catechism) = record else {
        return Rendered::NotFound;
    };
    let CatechismBody::Days { days } = &catechism.body else {
        return Rendered::NotFound;
    };
    Rendered::Page(
        Element::new("div")
            .class(ROOT_CLASS)
            .children(header(&catechism.name, record.publication_year()))
            .child(
                Element::new("div")
                    .class("catechism-questions")
                    .children(days.iter().map(render_day)),
            ),
    )
}

fn render_day(day: &Day) -> Element {
    Element::new("div")
        .class("catechism-day")
        .child(Element::new("h3").text(format!("Lord's Day {}", day.number)))
        .children(day.questions.iter().map(|question| {
            Element::new("div")
                .class("catechism-question")
                .child(Element::new("h4").text(question_heading(question)))
                .child(paragraph(&question.answer))
                .children(render_citations(question.verses.as_ref()))
        }))
}

pub(crate) fn render_catechism(record: &Record, _options: &RenderOptions) -> Rendered {
    let Record::Catechism(catechism) = record else {
        return Rendered::NotFound;
    };
    let CatechismBody::Questions { questions } = &catechism.body else {
        return Rendered::NotFound;
    };
    Rendered::Page(
        Element::new("div")
            .class(ROOT_CLASS)
            .children(header(&catechism.name, record.publication_year()))
            .child(
                Element::new("div")
                    .class("catechism-questions")
                    .children(questions.iter().map(render_question)),
            ),
    )
}

fn render_question(question: &Question) -> Element {
    Element::new("div")
        .class("catechism-question")
        .child(Element::new("h3").text(question_heading(question)))
        .child(
            Element::new("div")
                .class("catechism-question__answer")
                .child(paragraph(&question.answer))
                .children(render_citations(question.verses.as_ref())),
        )
}

fn question_heading(question: &Question) -> String {
    format!("Question {}: {}", question.number, question.question)
}

pub(crate) fn render_document(record: &Record, options: &RenderOptions) -> Rendered {
    let Record::Document(document) = record else {
        return Rendered::NotFound;
    };
    let numbered = options
        .thesis_documents
        .iter()
        .any(|name| *name == document.name);
    Rendered::Page(
        Element::new("div")
            .class(ROOT_CLASS)
            .children(header(&document.name, record.publication_year()))
            .child(
                Element::new("div").class("confession-chapters").children(
                    document
                        .chapters
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| render_entry(entry, i, numbered)),
                ),
            ),
    )
}

fn render_entry(entry: &DocumentEntry, index: usize, numbered: bool) -> Element {
    let block = Element::new("div").class("confession-chapter");
    match entry {
        DocumentEntry::Section(section) => block
            .child(Element::new("h3").text(&section.name))
            .child(paragraph(&section.text))
            .children(render_citations(section.verses.as_ref())),
        DocumentEntry::Thesis(text) if numbered => block
            .child(Element::new("h3").text(format!("Thesis {}", index + 1)))
            .child(paragraph(text)),
        DocumentEntry::Thesis(text) => block.child(paragraph(text)),
    }
}

pub(crate) fn render_not_found(_record: &Record, _options: &RenderOptions) -> Rendered {
    Rendered::NotFound
}

//! Shape dispatch and recursive rendering of Creeds records.
//!
//! A [`Record`](creeds_store::Record) is classified into a [`Shape`], which
//! selects one renderer from the family:
//!
//! - creed: title and text
//! - confession: chapters, optionally split into articles with citations
//! - catechism: Lord's Days of questions, or a flat question list
//! - document: named sections and bare theses
//!
//! Renderers produce an [`Element`] tree with class hooks (`confession`,
//! `confession-chapter`, `catechism-day`, `catechism-question`,
//! `scripture-citation`, ...) that serializes to HTML. Records with an
//! unrecognized type render as [`Rendered::NotFound`].

mod citations;
mod dispatch;
mod node;
mod shapes;
mod title;

pub use citations::{CITATION_CLASS, render_article_citations, render_citations};
pub use dispatch::{Shape, render, select_renderer};
pub use node::{Element, Node, escape_html};
pub use shapes::{ROOT_CLASS, RenderFn, RenderOptions, Rendered};
pub use title::title_case;

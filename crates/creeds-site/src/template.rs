//! HTML page templates for static site generation.

use std::fmt::Write;

use creeds_renderer::escape_html;

/// All data needed to render a document page.
pub(crate) struct PageData<'a> {
    pub title: &'a str,
    pub site_title: &'a str,
    /// Rendered document body.
    pub body_html: &'a str,
    /// Relative link back to the index page.
    pub home_href: &'a str,
}

/// A link on the index page.
pub(crate) struct LinkData {
    pub title: String,
    pub href: String,
}

/// One category section on the index page.
pub(crate) struct CategoryData {
    pub name: String,
    pub documents: Vec<LinkData>,
}

fn render_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    html.push_str("</head>\n");
}

/// Render a complete document page.
pub(crate) fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.body_html.len() + 1024);
    let title = if page.title.is_empty() {
        page.site_title.to_owned()
    } else {
        format!("{} | {}", page.title, page.site_title)
    };
    render_head(&mut html, &title);
    html.push_str("<body>\n<nav class=\"site-nav\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\">{}</a>",
        escape_html(page.home_href),
        escape_html(page.site_title)
    );
    html.push_str("</nav>\n<main>\n");
    html.push_str(page.body_html);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

/// Render the index page listing every document by category.
pub(crate) fn render_index(site_title: &str, categories: &[CategoryData]) -> String {
    let mut html = String::with_capacity(4096);
    render_head(&mut html, site_title);
    html.push_str("<body>\n<main class=\"site-index\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(site_title));
    for category in categories {
        html.push_str("<section class=\"site-index__category\">\n");
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(&category.name));
        html.push_str("<ul>\n");
        for doc in &category.documents {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&doc.href),
                escape_html(&doc.title)
            );
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_contains_body() {
        let html = render_page(&PageData {
            title: "Nicene Creed",
            site_title: "Creeds",
            body_html: "<div class=\"confession\"><p>We believe</p></div>",
            home_href: "../../",
        });

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Nicene Creed | Creeds</title>"));
        assert!(html.contains("<p>We believe</p>"));
        assert!(html.contains("<a href=\"../../\">Creeds</a>"));
    }

    #[test]
    fn test_render_page_without_title_uses_site_title() {
        let html = render_page(&PageData {
            title: "",
            site_title: "Creeds",
            body_html: "",
            home_href: "../../",
        });

        assert!(html.contains("<title>Creeds</title>"));
    }

    #[test]
    fn test_render_index_groups_categories() {
        let html = render_index(
            "Creeds & Confessions",
            &[CategoryData {
                name: "catechisms".to_owned(),
                documents: vec![LinkData {
                    title: "Heidelberg Catechism".to_owned(),
                    href: "confession/heidelberg-catechism/".to_owned(),
                }],
            }],
        );

        assert!(html.contains("<h1>Creeds &amp; Confessions</h1>"));
        assert!(html.contains("<h2>catechisms</h2>"));
        assert!(html.contains(
            "<li><a href=\"confession/heidelberg-catechism/\">Heidelberg Catechism</a></li>"
        ));
    }
}

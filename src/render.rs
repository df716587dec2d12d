//! HTML page rendering

use askama::Template;

use crate::models::PageData;

/// Lookup form plus the result of the last submission.
/// Interpolated values are HTML-escaped by the template engine.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    page: &'a PageData,
}

/// Render the full HTML document for `page`
pub fn render(page: &PageData) -> crate::Result<String> {
    Ok(IndexPage { page }.render()?)
}

//! Markdown to HTML conversion for note previews.

use pulldown_cmark::{html, Options, Parser};

/// Shown in place of an empty note body
pub const EMPTY_PREVIEW: &str = "*No content yet*";

/// Converts markdown text to HTML.
///
/// Enables the GitHub-flavored extensions notes rely on: tables, footnotes,
/// strikethrough and task lists.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Render a note body, substituting the placeholder when it is empty
pub fn preview_html(content: &str) -> String {
    if content.is_empty() {
        render_markdown(EMPTY_PREVIEW)
    } else {
        render_markdown(content)
    }
}

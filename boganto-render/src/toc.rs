//! Table-of-contents markup.

use boganto_core::html::escape;
use boganto_core::HeadingEntry;

/// Render the in-page navigation list, or `None` when there are no headings
pub fn render_toc(headings: &[HeadingEntry]) -> Option<String> {
    if headings.is_empty() {
        return None;
    }

    let mut html =
        String::from(r#"<nav class="toc-nav"><p class="toc-title">Contents</p><ul class="toc-list">"#);
    for h in headings {
        html.push_str(&format!(
            r##"<li class="toc-level-{}"><a href="#{}" data-scroll="smooth">{}</a></li>"##,
            h.level.as_u8(),
            escape(&h.id),
            escape(&h.text)
        ));
    }
    html.push_str("</ul></nav>");
    Some(html)
}

use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Event, Options, Parser};

/// Render analysis markdown to sanitized HTML.
///
/// Single newlines are kept as line breaks: the analysis bodies put one
/// formula per line without blank lines in between.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(input, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "a", "h1", "h2", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn headings_and_bold_survive() {
        let html = markdown_to_html("### Power Output\n**Theoretical Power:** P = ρgQH");
        assert!(html.contains("<h3>Power Output</h3>"), "{html}");
        assert!(html.contains("<strong>Theoretical Power:</strong>"), "{html}");
    }

    #[test]
    fn consecutive_lines_become_line_breaks() {
        let html = markdown_to_html("**A:** one\n**B:** two");
        assert!(html.contains("<br"), "{html}");
    }

    #[test]
    fn scripts_and_handlers_are_stripped() {
        let html = markdown_to_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script"), "{html}");

        let cleaned = sanitize_html("<a href=\"https://example.com\" onclick=\"x()\">x</a>");
        assert!(cleaned.contains("href=\"https://example.com\""), "{cleaned}");
        assert!(!cleaned.contains("onclick"), "{cleaned}");
    }

    #[test]
    fn images_are_not_allowed() {
        let cleaned = sanitize_html("<p><img src=\"x.png\">text</p>");
        assert_eq!(cleaned, "<p>text</p>");
    }
}

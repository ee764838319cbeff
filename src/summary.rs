//! Markdown rendering and summaries.
//!
//! Summaries are cut from the *rendered* HTML, so a summary carries the same
//! markup as the full article. A marker written on its own line:
//!
//! ```text
//! First paragraph.
//!
//! <!--more-->
//!
//! The rest.
//! ```
//!
//! passes through pulldown-cmark as a raw HTML block, which leaves
//! `<p>First paragraph.</p>\n` as the summary. A marker written inline ends
//! up inside a paragraph, and the summary keeps the unclosed `<p>`.

use crate::types::Article;
use pulldown_cmark::{Options, Parser, html as md_html};

/// Convert markdown to HTML.
pub fn render_markdown(markdown: &str, options: Options) -> String {
    let parser = Parser::new_ext(markdown, options);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

/// Everything before the first `marker`, or the whole body without one.
pub fn summarize<'a>(body: &'a str, marker: &str) -> &'a str {
    match body.split_once(marker) {
        Some((summary, _)) => summary,
        None => body,
    }
}

/// Pipeline stage: replace the markdown body with HTML.
pub fn render(mut article: Article, options: Options) -> Article {
    article.body = render_markdown(&article.body, options);
    article
}

/// Pipeline stage: set `data.summary` from the rendered body.
pub fn attach_summary(mut article: Article, marker: &str) -> Article {
    article.data.summary = summarize(&article.body, marker).to_string();
    article
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MORE: &str = "<!--more-->";

    #[test]
    fn summary_stops_at_marker() {
        assert_eq!(summarize("Hi<!--more-->more text", MORE), "Hi");
    }

    #[test]
    fn summary_uses_first_marker_only() {
        assert_eq!(summarize("a<!--more-->b<!--more-->c", MORE), "a");
    }

    #[test]
    fn summary_is_whole_body_without_marker() {
        assert_eq!(summarize("no marker here", MORE), "no marker here");
    }

    #[test]
    fn summary_empty_when_marker_leads() {
        assert_eq!(summarize("<!--more-->rest", MORE), "");
    }

    #[test]
    fn markdown_keeps_marker_as_html_block() {
        let html = render_markdown("Intro\n\n<!--more-->\n\nRest", Options::empty());
        assert_eq!(html, "<p>Intro</p>\n<!--more-->\n<p>Rest</p>\n");
    }

    #[test]
    fn smart_punctuation_applies() {
        let html = render_markdown("\"quoted\" -- dash", Options::ENABLE_SMART_PUNCTUATION);
        assert!(html.contains('\u{201c}'));
        assert!(html.contains('\u{2013}'));
    }

    #[test]
    fn summary_is_taken_from_rendered_body() {
        let article = Article::new(
            PathBuf::from("2021-3-5-x.md"),
            "*Intro*\n\n<!--more-->\n\nRest".to_string(),
        );
        let article = attach_summary(render(article, Options::empty()), MORE);
        assert_eq!(article.data.summary, "<p><em>Intro</em></p>\n");
        assert!(article.body.contains("<p>Rest</p>"));
    }

    #[test]
    fn summary_equals_full_body_without_marker() {
        let article = Article::new(PathBuf::from("x.md"), "Only text".to_string());
        let article = attach_summary(render(article, Options::empty()), MORE);
        assert_eq!(article.data.summary, article.body);
        assert_eq!(article.data.summary, "<p>Only text</p>\n");
    }
}

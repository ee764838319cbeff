//! Built-in pages used when the site has no template of its own.
//!
//! A fresh site with nothing but an `articles/` directory still builds: each
//! article gets a plain detail page and the output root gets an index
//! listing every post and every tag. As soon as the templates directory
//! provides `partials/article.html` or `index.html`, those take over.
//!
//! Pages are rendered with [Maud](https://maud.lambda.xyz/). Article
//! `summary` and `content` are already HTML and are inserted unescaped;
//! everything else is escaped.

use crate::collect::{Collection, UNTAGGED};
use crate::types::ArticleData;
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

/// Human-readable date used on built-in pages.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn tag_links(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            p.tag-list {
                @for tag in tags {
                    a href={ "/index.html#tag-" (tag) } { (tag) }
                }
            }
        }
    }
}

/// Detail page for a single article.
pub fn article_page(data: &ArticleData, content: &str) -> Markup {
    let title = data.title();
    let body = html! {
        header.site-header {
            a href="/index.html" { "\u{2190} All posts" }
        }
        main {
            article {
                h1 { (title) }
                @if let Some(date) = data.date {
                    p.post-meta {
                        time datetime=(date.to_string()) { (display_date(date)) }
                    }
                }
                (PreEscaped(content))
                @if let Some(tags) = &data.tags {
                    (tag_links(tags))
                }
            }
        }
    };
    base_document(&title, body)
}

/// Index page listing every post, newest first, then posts grouped by tag.
///
/// `articles_href` is the site path of the article output directory
/// (e.g. `/articles`); post permalinks are relative to it.
pub fn index_page(site_title: &str, articles_href: &str, collection: &Collection) -> Markup {
    let body = html! {
        header.site-header {
            h1 { (site_title) }
        }
        main {
            ul.post-list {
                @for post in &collection.posts {
                    li {
                        h2 {
                            @match &post.url {
                                Some(url) => {
                                    a href={ (articles_href) (url) } { (post.title()) }
                                }
                                None => {
                                    a href={ (articles_href) "/" (post.file_title) ".html" } { (post.title()) }
                                }
                            }
                        }
                        @if let Some(date) = post.date {
                            p.post-meta {
                                time datetime=(date.to_string()) { (display_date(date)) }
                            }
                        }
                        (PreEscaped(&post.summary))
                    }
                }
            }
            @if !collection.tags.is_empty() {
                section.tags {
                    h2 { "Tags" }
                    @for tag in &collection.tags {
                        h3 id={ "tag-" (tag) } {
                            @if tag == UNTAGGED { "Untagged" } @else { (tag) }
                        }
                        ul {
                            @for post in collection.posts_tagged(tag) {
                                li { (post.title()) }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(site_title, body)
}

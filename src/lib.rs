//! # Gazette
//!
//! A static blog generator. A directory of markdown articles becomes a set of
//! dated article pages plus site-wide pages (index, tag listings, feeds)
//! rendered from templates that see every article at once.
//!
//! # Architecture: Stream, Fold, Render
//!
//! Each article flows through a fixed chain of stages, is rendered to its own
//! page, and is folded into a shared [`collect::Collection`]. Site pages are
//! rendered only once that fold is complete:
//!
//! ```text
//! articles/*.md ─ front matter ─ markdown ─ summary ─ date/url ─┬─ article page
//!                                                               └─ collect
//!                                                                    │ finish
//!                                                    templates/*.html ─ site pages
//! ```
//!
//! The collection is the only thing site pages see, and it can only be
//! obtained by consuming the [`collect::Collector`]. A site page can never
//! observe a partially aggregated blog.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Finds article sources and reads them |
//! | [`frontmatter`] | Splits the leading YAML block off an article |
//! | [`summary`] | Markdown rendering and the `<!--more-->` summary cut |
//! | [`naming`] | `YYYY-M-D-slug` filename convention: date, permalink, file title |
//! | [`collect`] | Aggregation: posts newest first, distinct tags |
//! | [`render`] | Template loading and page writing for both render phases |
//! | [`theme`] | Built-in Maud pages used when a site ships no template |
//! | [`pipeline`] | Orchestration, failure isolation, the build report |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`types`] | `Article` and the template-facing `ArticleData` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Templates Are Data, the Theme Is Code
//!
//! Site authors write MiniJinja templates: article pages come from
//! `partials/article.html`, and every other non-partial `.html`, `.htm`,
//! `.xml` or `.txt` file in the templates directory becomes a page of the
//! same name. When a site has no templates the built-in [`theme`] renders
//! article pages and the index with Maud, so a bare articles directory still
//! produces a browsable blog.
//!
//! ## Filenames Carry the Date
//!
//! `2021-3-5-hello-world.md` is published on 5 March 2021 at
//! `/2021/3/5/hello-world.html`. Files that don't follow the convention are
//! still built, without a date or permalink, and sort after every dated post.
//! A name that fits the pattern but not the calendar (`2021-13-1-x`) keeps
//! its permalink and only loses the date.
//!
//! ## Failures Stay Local
//!
//! A broken article or template is reported and skipped; the rest of the
//! build goes ahead. Only problems that make the whole run meaningless
//! (bad config, unreadable articles directory) stop it.

pub mod collect;
pub mod config;
pub mod frontmatter;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod summary;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

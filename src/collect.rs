//! Article aggregation.
//!
//! [`Collector`] folds every article of a build into a [`Collection`]: all
//! article data sorted newest first, plus the distinct tags in the order they
//! were first seen. Finalization consumes the collector, so a collection can
//! only exist once every article has been observed, and site pages (which
//! need the collection) cannot be rendered before that.
//!
//! ## Untagged articles
//!
//! An article without a `tags` key contributes the empty string to the tag
//! list, once per build. Templates can use it to offer an "untagged" bucket.
//! An article with an explicit empty list (`tags: []`) contributes nothing.

use crate::types::{Article, ArticleData};
use serde::Serialize;
use std::cmp::Ordering;

/// The tag recorded for articles without a `tags` key.
pub const UNTAGGED: &str = "";

/// Stateful accumulator for one build.
#[derive(Debug, Default)]
pub struct Collector {
    posts: Vec<ArticleData>,
    tags: Vec<String>,
}

/// Everything the site templates get from the articles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    /// Article data, date descending, undated articles last.
    pub posts: Vec<ArticleData>,
    /// Distinct tags in first-seen order.
    pub tags: Vec<String>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one article. Its `content` is set to the rendered body.
    pub fn observe(&mut self, article: &Article) {
        let mut data = article.data.clone();
        data.content = article.body.clone();

        match &data.tags {
            Some(tags) => {
                for tag in tags {
                    self.insert_tag(tag);
                }
            }
            None => self.insert_tag(UNTAGGED),
        }

        self.posts.push(data);
    }

    fn insert_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Number of articles observed so far.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Sort and publish. The sort is stable, so articles sharing a date (and
    /// undated articles) keep the order they were observed in.
    pub fn finish(self) -> Collection {
        let Self { mut posts, tags } = self;
        posts.sort_by(newest_first);
        Collection { posts, tags }
    }
}

fn newest_first(a: &ArticleData, b: &ArticleData) -> Ordering {
    match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Collection {
    /// Posts carrying `tag`. The empty tag selects untagged posts.
    pub fn posts_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ArticleData> {
        self.posts.iter().filter(move |p| match &p.tags {
            Some(tags) => tags.iter().any(|t| t == tag),
            None => tag == UNTAGGED,
        })
    }
}

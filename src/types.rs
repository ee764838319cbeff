//! Shared types passed between pipeline stages.
//!
//! An [`Article`] is created by the reader, handed by value through each
//! stage, and finally folded into a [`Collection`](crate::collect::Collection).
//! [`ArticleData`] is the part templates see; its serialized field names are
//! the names template authors use (`summary`, `date`, `url`, `tags`,
//! `content`, `fileTitle`, plus any front-matter key).

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Front-matter keys the pipeline derives itself. Values supplied in the
/// front matter under these names are discarded.
pub const DERIVED_KEYS: &[&str] = &["summary", "date", "url", "content", "fileTitle"];

/// One article as it moves through the pipeline.
#[derive(Debug, Clone)]
pub struct Article {
    /// Path of the markdown source.
    pub source_path: PathBuf,
    /// Body text. Markdown after the split, HTML once rendered.
    pub body: String,
    pub data: ArticleData,
}

impl Article {
    pub fn new(source_path: PathBuf, body: String) -> Self {
        Self {
            source_path,
            body,
            data: ArticleData::default(),
        }
    }

    /// File name without its `.md` extension.
    pub fn stem(&self) -> String {
        self.source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Metadata attached to an article and exposed to templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleData {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `None` when the front matter has no `tags` key at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Full rendered body; filled in by the aggregator.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(rename = "fileTitle")]
    pub file_title: String,
    /// Remaining front-matter keys, passed through to templates.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ArticleData {
    /// Display title: the front-matter `title` when it is a string,
    /// otherwise the file title with dashes turned into spaces.
    pub fn title(&self) -> String {
        match self.extra.get("title") {
            Some(serde_yaml::Value::String(t)) if !t.trim().is_empty() => t.trim().to_string(),
            _ => self.file_title.replace('-', " "),
        }
    }
}

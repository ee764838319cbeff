//! Front-matter splitting.
//!
//! An article may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello, World
//! tags: [intro, meta]
//! ---
//! Body text starts here.
//! ```
//!
//! The block is parsed into the article's [`ArticleData`]: `tags` gets its own
//! typed field, keys the pipeline derives itself are dropped, and everything
//! else lands in `extra` for the templates. The body keeps only what follows
//! the closing fence.

use crate::types::{Article, ArticleData, DERIVED_KEYS};
use log::debug;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("front matter in {0} must be a key/value mapping")]
    NotAMapping(PathBuf),
}

/// Split `raw` into its front-matter block and body.
///
/// Returns `(None, raw)` when the text does not open with a fence line or the
/// fence is never closed.
pub fn split(raw: &str) -> (Option<&str>, &str) {
    let raw_no_bom = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(first_break) = raw_no_bom.find('\n') else {
        return (None, raw);
    };
    if raw_no_bom[..first_break].trim_end() != FENCE {
        return (None, raw);
    }

    let rest = &raw_no_bom[first_break + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(block), body);
        }
        offset += line.len();
    }
    (None, raw)
}

/// Parse a front-matter block into article data.
fn parse_block(block: &str, path: &Path) -> Result<ArticleData, FrontMatterError> {
    let mut data = ArticleData::default();
    if block.trim().is_empty() {
        return Ok(data);
    }

    let value: Value = serde_yaml::from_str(block).map_err(|source| FrontMatterError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match value {
        Value::Mapping(m) => m,
        Value::Null => return Ok(data),
        _ => return Err(FrontMatterError::NotAMapping(path.to_path_buf())),
    };

    let mut extra = BTreeMap::new();
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            debug!("{}: skipping non-scalar front-matter key", path.display());
            continue;
        };
        if key == "tags" {
            data.tags = Some(parse_tags(&value));
        } else if DERIVED_KEYS.contains(&key.as_str()) {
            debug!(
                "{}: front-matter key '{key}' is derived by the build, ignoring",
                path.display()
            );
        } else {
            extra.insert(key, value);
        }
    }
    data.extra = extra;
    Ok(data)
}

/// `tags` may be a list of scalars or a single scalar.
fn parse_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::Null => Vec::new(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Pipeline stage: strip the front matter from the article body into `data`.
pub fn extract(mut article: Article) -> Result<Article, FrontMatterError> {
    let (block, body) = split(&article.body);
    let Some(block) = block else {
        return Ok(article);
    };
    let data = parse_block(block, &article.source_path)?;
    let body = body.to_string();
    article.data = data;
    article.body = body;
    Ok(article)
}

//! Article discovery.
//!
//! First stage of the build. Finds the markdown sources in the articles
//! directory and loads each one into an [`Article`]:
//!
//! ```text
//! site/                            # Source root
//! ├── config.toml                  # Site configuration (optional)
//! ├── articles/
//! │   ├── 2021-3-5-hello-world.md  # Dated: /2021/3/5/hello-world.html
//! │   ├── 2021-11-20-second.md
//! │   ├── not-a-date-name.md       # Undated: built, but no permalink
//! │   └── .draft.md                # Hidden: ignored
//! └── templates/
//!     └── ...
//! ```
//!
//! Only `.md` files directly inside the articles directory are articles.
//! They are returned in path order so every build sees the same sequence.

use crate::types::Article;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read articles directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the article sources in `dir`, sorted by path.
///
/// A missing directory yields no articles; an unreadable one is an error.
pub fn find_articles(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.exists() {
        warn!("articles directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut md_files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_article(p))
        .collect();

    md_files.sort();
    Ok(md_files)
}

fn is_article(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
}

/// Load an article's raw text.
pub fn read_article(path: &Path) -> std::io::Result<Article> {
    let raw = fs::read_to_string(path)?;
    Ok(Article::new(path.to_path_buf(), raw))
}

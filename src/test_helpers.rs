//! Shared test utilities for the gazette test suite.
//!
//! Provides fixture setup, lookup helpers, and ordering assertions that work
//! with aggregation data (`Collection`, `ArticleData`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = pipeline::run(tmp.path(), &tmp.path().join("dist"), Mode::Check).unwrap();
//!
//! let post = find_post(&report.collection, "hello-world");
//! assert_eq!(post.title(), "Hello, World");
//! assert_posts_sorted(&report.collection);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::collect::Collection;
use crate::types::ArticleData;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Collection lookups, panics with a clear message on miss
// =========================================================================

/// Find a post by file title. Panics if not found.
pub fn find_post<'a>(collection: &'a Collection, file_title: &str) -> &'a ArticleData {
    collection
        .posts
        .iter()
        .find(|p| p.file_title == file_title)
        .unwrap_or_else(|| {
            let names: Vec<&str> = collection
                .posts
                .iter()
                .map(|p| p.file_title.as_str())
                .collect();
            panic!("post '{file_title}' not found. Available: {names:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All display titles in collection order.
pub fn post_titles(collection: &Collection) -> Vec<String> {
    collection.posts.iter().map(ArticleData::title).collect()
}

// =========================================================================
// Ordering
// =========================================================================

/// Assert dated posts are non-increasing by date and undated posts come last.
pub fn assert_posts_sorted(collection: &Collection) {
    for pair in collection.posts.windows(2) {
        match (pair[0].date, pair[1].date) {
            (Some(a), Some(b)) => assert!(
                a >= b,
                "'{}' ({a}) sorts before newer '{}' ({b})",
                pair[0].file_title,
                pair[1].file_title
            ),
            (None, Some(_)) => panic!(
                "undated '{}' sorts before dated '{}'",
                pair[0].file_title, pair[1].file_title
            ),
            _ => {}
        }
    }
}

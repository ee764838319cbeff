//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. A single file in
//! the source root is layered on top of the stock defaults, so a user file
//! only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]                        # Free-form data handed to every site template
//! # title = "My Blog"
//!
//! [articles]
//! dir = "articles"              # Article sources, relative to the source root
//! output_dir = "articles"       # Article pages, relative to the output root
//! summary_marker = "<!--more-->"
//!
//! [templates]
//! dir = "templates"             # Site templates, relative to the source root
//! partials_dir = "partials"     # Never rendered as pages on their own
//! article = "article.html"      # Article detail template, inside partials_dir
//!
//! [markdown]
//! smart_punctuation = true
//! tables = true
//! strikethrough = true
//! footnotes = false
//! ```
//!
//! ## The `[site]` table
//!
//! Everything under `[site]` is passed through untouched and becomes the top
//! level of the site template context, next to the generated `posts` and
//! `tags`. Those two names are therefore reserved. Every other section
//! rejects unknown keys to catch typos early.

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Keys the pipeline adds to the site context; `[site]` may not define them.
pub const RESERVED_SITE_KEYS: &[&str] = &["posts", "tags"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Free-form template data.
    pub site: toml::Table,
    /// Where articles are read from and written to.
    pub articles: ArticlesConfig,
    /// Template discovery.
    pub templates: TemplatesConfig,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.articles.summary_marker.is_empty() {
            return Err(ConfigError::Validation(
                "articles.summary_marker must not be empty".into(),
            ));
        }
        let dirs = [
            ("articles.dir", &self.articles.dir),
            ("articles.output_dir", &self.articles.output_dir),
            ("templates.dir", &self.templates.dir),
            ("templates.partials_dir", &self.templates.partials_dir),
            ("templates.article", &self.templates.article),
        ];
        for (key, value) in dirs {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        for key in RESERVED_SITE_KEYS {
            if self.site.contains_key(*key) {
                return Err(ConfigError::Validation(format!(
                    "site.{key} is generated by the build and cannot be set"
                )));
            }
        }
        Ok(())
    }
}

/// Article source and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArticlesConfig {
    /// Directory holding `YYYY-M-D-slug.md` sources.
    pub dir: String,
    /// Directory (under the output root) receiving article pages.
    pub output_dir: String,
    /// Literal token ending an article's summary.
    pub summary_marker: String,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            dir: "articles".to_string(),
            output_dir: "articles".to_string(),
            summary_marker: "<!--more-->".to_string(),
        }
    }
}

/// Template discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub dir: String,
    pub partials_dir: String,
    /// Article detail template, relative to `partials_dir`.
    pub article: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: "templates".to_string(),
            partials_dir: "partials".to_string(),
            article: "article.html".to_string(),
        }
    }
}

/// Markdown extensions passed to pulldown-cmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            smart_punctuation: true,
            tables: true,
            strikethrough: true,
            footnotes: false,
        }
    }
}

impl MarkdownConfig {
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, falling back to
/// stock defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gazette Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys cause an error, except inside [site].

# ---------------------------------------------------------------------------
# Site data
# ---------------------------------------------------------------------------
# Anything here is available at the top level of every site template,
# next to the generated `posts` (newest first) and `tags` lists.
# `posts` and `tags` themselves are reserved.
[site]
# title = "My Blog"
# author = "Jane Doe"

# ---------------------------------------------------------------------------
# Articles
# ---------------------------------------------------------------------------
[articles]
# Source directory, relative to the source root. Files are named
# YYYY-M-D-slug.md and get the permalink /YYYY/M/D/slug.html.
dir = "articles"

# Where article pages go, relative to the output root.
output_dir = "articles"

# Everything before this token becomes the article summary.
summary_marker = "<!--more-->"

# ---------------------------------------------------------------------------
# Templates (minijinja)
# ---------------------------------------------------------------------------
[templates]
# Every .html, .htm, .xml and .txt file under this directory, except those in
# partials_dir, is rendered as a page. Other files are ignored.
dir = "templates"

# Layouts, includes and the article template live here.
partials_dir = "partials"

# Article detail template, inside partials_dir. A built-in page is used
# when it does not exist.
article = "article.html"

# ---------------------------------------------------------------------------
# Markdown
# ---------------------------------------------------------------------------
[markdown]
smart_punctuation = true
tables = true
strikethrough = true
footnotes = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_article_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.articles.dir, "articles");
        assert_eq!(config.articles.output_dir, "articles");
        assert_eq!(config.articles.summary_marker, "<!--more-->");
        assert!(config.site.is_empty());
    }

    #[test]
    fn default_config_has_template_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.templates.dir, "templates");
        assert_eq!(config.templates.partials_dir, "partials");
        assert_eq!(config.templates.article, "article.html");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[articles]
summary_marker = "<!-- cut -->"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.articles.summary_marker, "<!-- cut -->");
        // Defaults preserved
        assert_eq!(config.articles.dir, "articles");
        assert!(config.markdown.smart_punctuation);
    }

    #[test]
    fn site_table_is_free_form() {
        let toml = r##"
[site]
title = "Field Notes"
nav = ["home", "about"]

[site.social]
mastodon = "@me@example.social"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site["title"].as_str(), Some("Field Notes"));
        assert!(config.site["social"].is_table());
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("colour = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_key_is_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[articles]\nfolder = \"posts\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn markdown_options_follow_config() {
        let mut md = MarkdownConfig::default();
        let options = md.options();
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));

        md.smart_punctuation = false;
        md.footnotes = true;
        let options = md.options();
        assert!(!options.contains(Options::ENABLE_SMART_PUNCTUATION));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_overrides_leaf_and_keeps_siblings() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let base: toml::Value = toml::from_str("list = [1, 2, 3]\n").unwrap();
        let overlay: toml::Value = toml::from_str("list = [9]\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["list"].as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.articles.summary_marker, "<!--more-->");
        assert_eq!(config.templates.dir, "templates");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
title = "Notebook"

[articles]
dir = "posts"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site["title"].as_str(), Some("Notebook"));
        assert_eq!(config.articles.dir, "posts");
        // Unspecified values should be defaults
        assert_eq!(config.articles.output_dir, "articles");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[templates]\nlayout = \"x\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn empty_summary_marker_is_rejected() {
        let mut config = SiteConfig::default();
        config.articles.summary_marker = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn blank_directory_is_rejected() {
        let mut config = SiteConfig::default();
        config.templates.dir = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn reserved_site_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nposts = []\n").unwrap();

        let result = load_config(tmp.path());
        match result {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("site.posts")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.articles.dir, defaults.articles.dir);
        assert_eq!(
            config.articles.summary_marker,
            defaults.articles.summary_marker
        );
        assert_eq!(config.templates.article, defaults.templates.article);
        assert!(config.validate().is_ok());
    }
}

//! Build orchestration.
//!
//! Runs every article through the per-article stages, folds the results into
//! a [`Collection`], and only then renders the site pages:
//!
//! ```text
//! read → front matter → markdown → summary → date/url → collect ─┐
//!                                            └→ article page     │
//!                                                   finish ←─────┘
//!                                                     └→ site pages
//! ```
//!
//! Failures are isolated: an article that cannot be read or whose front
//! matter is malformed is reported and left out; a page that fails to render
//! is reported and the rest are still written. Loading the config, listing
//! the articles, and listing the templates are fatal, since nothing useful
//! can be produced without them.

use crate::collect::{Collection, Collector};
use crate::config::{self, ConfigError, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::naming;
use crate::render::{self, RenderError, SiteContext, Templates};
use crate::scan::{self, ScanError};
use crate::summary;
use crate::types::Article;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("cannot create output directory {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single article was left out of the build.
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
}

impl ArticleError {
    fn stage(&self) -> Stage {
        match self {
            ArticleError::Read { .. } => Stage::Read,
            ArticleError::FrontMatter(_) => Stage::FrontMatter,
        }
    }
}

/// Pipeline step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    FrontMatter,
    ArticlePage,
    SitePage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Read => "read",
            Stage::FrontMatter => "front matter",
            Stage::ArticlePage => "article page",
            Stage::SitePage => "site page",
        };
        f.write_str(label)
    }
}

/// A reported, non-fatal failure.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub stage: Stage,
    pub message: String,
}

/// Which outputs a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ingest and aggregate only; nothing is written.
    Check,
    /// Article pages only.
    Articles,
    /// Article pages, then site pages.
    Full,
}

impl Mode {
    fn writes_articles(self) -> bool {
        matches!(self, Mode::Articles | Mode::Full)
    }
}

/// One successfully ingested article, as reported back to the CLI.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub source: PathBuf,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Written page, when the run writes article pages and rendering worked.
    pub output: Option<PathBuf>,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Ingested articles in source order.
    pub articles: Vec<ArticleRecord>,
    pub collection: Collection,
    /// Site pages written.
    pub pages: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the per-article stages over one source file.
pub fn ingest(path: &Path, config: &SiteConfig) -> Result<Article, ArticleError> {
    let article = scan::read_article(path).map_err(|source| ArticleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let article = frontmatter::extract(article)?;
    let article = summary::render(article, config.markdown.options());
    let article = summary::attach_summary(article, &config.articles.summary_marker);
    Ok(naming::derive(article))
}

/// Site path of the article output directory, e.g. `/articles`.
pub fn articles_href(config: &SiteConfig) -> String {
    let trimmed = config.articles.output_dir.trim_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Load `config.toml` from `source` and run the build.
pub fn run(source: &Path, output: &Path, mode: Mode) -> Result<BuildReport, BuildError> {
    let config = config::load_config(source)?;
    run_with_config(source, output, &config, mode)
}

/// Run the build with an already loaded config.
pub fn run_with_config(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
    mode: Mode,
) -> Result<BuildReport, BuildError> {
    let templates = Templates::load(source, &config.templates);
    let articles_root = output.join(&config.articles.output_dir);
    let paths = scan::find_articles(&source.join(&config.articles.dir))?;

    if mode.writes_articles() {
        fs::create_dir_all(&articles_root).map_err(|source| BuildError::Output {
            path: articles_root.clone(),
            source,
        })?;
    }

    let mut report = BuildReport::default();
    let mut collector = Collector::new();

    for path in paths {
        let article = match ingest(&path, config) {
            Ok(article) => article,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                report.failures.push(Failure {
                    path,
                    stage: e.stage(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        collector.observe(&article);

        let mut output_path = None;
        if mode.writes_articles() {
            match render::render_article(&templates, &article, &articles_root) {
                Ok(written) => {
                    debug!("wrote {}", written.display());
                    output_path = Some(written);
                }
                Err(e) => {
                    warn!("article page for {} failed: {e}", path.display());
                    report.failures.push(Failure {
                        path: path.clone(),
                        stage: Stage::ArticlePage,
                        message: e.to_string(),
                    });
                }
            }
        }

        report.articles.push(ArticleRecord {
            source: path,
            title: article.data.title(),
            date: article.data.date,
            url: article.data.url.clone(),
            tags: article.data.tags.clone(),
            output: output_path,
        });
    }

    if collector.is_empty() {
        warn!("no articles found under {}", source.join(&config.articles.dir).display());
    } else {
        info!("aggregated {} articles", collector.len());
    }
    let collection = collector.finish();

    if mode == Mode::Full {
        let ctx = SiteContext::new(config, &collection);
        let href = articles_href(config);
        for outcome in render::render_site(&templates, &ctx, &href, output)? {
            match outcome.result {
                Ok(path) => report.pages.push(path),
                Err(e) => {
                    warn!("site page {} failed: {e}", outcome.name);
                    report.failures.push(Failure {
                        path: PathBuf::from(outcome.name),
                        stage: Stage::SitePage,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    report.collection = collection;
    Ok(report)
}

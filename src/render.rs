//! Page rendering.
//!
//! Two kinds of output, in two phases:
//!
//! 1. **Article pages**, one per article, rendered as articles stream through
//!    the pipeline. The template context is that article's data alone.
//! 2. **Site pages**, rendered once after aggregation. Every `.html`, `.htm`,
//!    `.xml` or `.txt` template under the templates directory, except those
//!    in the partials directory, is rendered with a [`SiteContext`] and
//!    written to the same relative path under the output root. Other files
//!    there are ignored.
//!
//! ## Templates
//!
//! Templates are [minijinja](https://docs.rs/minijinja) files loaded from the
//! templates directory, so partials can be shared with `{% extends %}` and
//! `{% include %}`. `.html` templates autoescape; `summary` and `content`
//! hold HTML and should be written as `{{ content|safe }}`.
//!
//! ```text
//! templates/
//! ├── index.html               → dist/index.html       (site page)
//! ├── tags.html                → dist/tags.html        (site page)
//! ├── feeds/atom.xml           → dist/feeds/atom.xml   (site page)
//! └── partials/
//!     ├── layout.html          # shared layout, never rendered alone
//!     └── article.html         # article detail template
//! ```
//!
//! When `partials/article.html` or `index.html` is missing, the built-in
//! pages from [`theme`](crate::theme) are used instead.
//!
//! ## Article output paths
//!
//! Articles with a permalink land there under the article output root
//! (`articles/2021/3/5/hello-world.html`); the rest at
//! `articles/<fileTitle>.html`.

use crate::collect::Collection;
use crate::config::{SiteConfig, TemplatesConfig};
use crate::theme;
use crate::types::{Article, ArticleData};
use minijinja::{Environment, path_loader};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extensions rendered as site pages. Anything else in the templates
/// directory (stylesheets, images) is left alone.
pub const PAGE_EXTENSIONS: &[&str] = &["html", "htm", "xml", "txt"];

fn is_page_template(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PAGE_EXTENSIONS.iter().any(|p| e.eq_ignore_ascii_case(p)))
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("cannot list templates: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Template context for site pages: the `[site]` table at the top level,
/// plus `posts` and `tags` from the finished collection.
#[derive(Debug, Serialize)]
pub struct SiteContext<'a> {
    #[serde(flatten)]
    site: &'a toml::Table,
    posts: &'a [ArticleData],
    tags: &'a [String],
    #[serde(skip)]
    collection: &'a Collection,
}

impl<'a> SiteContext<'a> {
    pub fn new(config: &'a SiteConfig, collection: &'a Collection) -> Self {
        Self {
            site: &config.site,
            posts: &collection.posts,
            tags: &collection.tags,
            collection,
        }
    }

    /// `site.title`, or "Blog".
    pub fn title(&self) -> &str {
        self.site
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Blog")
    }
}

/// Templates discovered in the site's templates directory.
pub struct Templates {
    env: Environment<'static>,
    root: PathBuf,
    partials_dir: String,
    article: String,
}

impl Templates {
    /// Set up a template environment rooted at `<source>/<templates.dir>`.
    ///
    /// A missing directory is not an error; every page then falls back to
    /// the built-in theme.
    pub fn load(source: &Path, config: &TemplatesConfig) -> Self {
        let root = source.join(&config.dir);
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        if root.is_dir() {
            env.set_loader(path_loader(&root));
        }
        Self {
            env,
            root,
            partials_dir: config.partials_dir.clone(),
            article: format!("{}/{}", config.partials_dir, config.article),
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    /// Name of the article template, if the site provides one.
    pub fn article_template(&self) -> Option<&str> {
        self.exists(&self.article).then_some(self.article.as_str())
    }

    /// Names of all site page templates, `/`-separated and sorted.
    pub fn pages(&self) -> Result<Vec<String>, RenderError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let partials = self.root.join(&self.partials_dir);
        let mut names = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || (e.path() != partials && !e.file_name().to_string_lossy().starts_with('.'))
            });
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_page_template(entry.path()) {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }
        Ok(names)
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let to_err = |source| RenderError::Template {
            name: name.to_string(),
            source,
        };
        let template = self.env.get_template(name).map_err(to_err)?;
        template.render(ctx).map_err(to_err)
    }
}

/// Where an article's page is written, relative to the article output root.
pub fn article_output_path(data: &ArticleData) -> PathBuf {
    let file_name = format!("{}.html", data.file_title);
    match &data.url {
        Some(url) => {
            let rel = Path::new(url.trim_start_matches('/'));
            match rel.parent() {
                Some(dir) => dir.join(file_name),
                None => PathBuf::from(file_name),
            }
        }
        None => PathBuf::from(file_name),
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), RenderError> {
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, html).map_err(io_err)
}

/// Render one article's detail page into `articles_root`.
///
/// The template sees the article's data with `content` set to the rendered
/// body, the same shape the article has in `posts`.
pub fn render_article(
    templates: &Templates,
    article: &Article,
    articles_root: &Path,
) -> Result<PathBuf, RenderError> {
    let html = match templates.article_template() {
        Some(name) => {
            let mut data = article.data.clone();
            data.content = article.body.clone();
            templates.render(name, &data)?
        }
        None => theme::article_page(&article.data, &article.body).into_string(),
    };
    let path = articles_root.join(article_output_path(&article.data));
    write_page(&path, &html)?;
    Ok(path)
}

/// Outcome of rendering one site page.
#[derive(Debug)]
pub struct PageOutcome {
    pub name: String,
    pub result: Result<PathBuf, RenderError>,
}

/// Render every site page into `output_dir`.
///
/// A failing page is reported in its [`PageOutcome`] and does not stop the
/// others. Only failing to list the templates is an error for the whole call.
pub fn render_site(
    templates: &Templates,
    ctx: &SiteContext<'_>,
    articles_href: &str,
    output_dir: &Path,
) -> Result<Vec<PageOutcome>, RenderError> {
    let names = templates.pages()?;
    let mut outcomes = Vec::with_capacity(names.len() + 1);

    for name in &names {
        let result = templates.render(name, ctx).and_then(|html| {
            let path = output_dir.join(name);
            write_page(&path, &html).map(|()| path)
        });
        outcomes.push(PageOutcome {
            name: name.clone(),
            result,
        });
    }

    if !names.iter().any(|n| n == "index.html") {
        let html = theme::index_page(ctx.title(), articles_href, ctx.collection).into_string();
        let path = output_dir.join("index.html");
        let result = write_page(&path, &html).map(|()| path);
        outcomes.push(PageOutcome {
            name: "index.html".to_string(),
            result,
        });
    }

    Ok(outcomes)
}

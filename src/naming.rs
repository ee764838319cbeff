//! Filename parsing for the `YYYY-M-D-slug` article convention.
//!
//! An article's publication date and permalink come from its file name, not
//! its front matter:
//!
//! - `2021-3-5-hello-world.md` → date 2021-03-05, url `/2021/3/5/hello-world.html`
//! - `2021-03-05-hello-world.md` → same date, url `/2021/03/05/hello-world.html`
//! - `notes.md` → no date, no url
//!
//! The numeric components go into the url exactly as written; `3` and `03`
//! give different permalinks. A name that matches the pattern but is not a
//! real calendar day (`2021-13-40-x`) still gets its url and file title; only
//! the date is left unset.

use crate::types::Article;
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static POST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})-(.*)").expect("post name pattern is valid")
});

/// Result of parsing a dated article stem like `2021-3-5-hello-world`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedName {
    /// `None` when the components are not a calendar day.
    pub date: Option<NaiveDate>,
    /// Year, month and day as they appear in the name.
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

impl DatedName {
    /// `/<year>/<month>/<day>/<slug>.html`, components verbatim.
    pub fn url(&self) -> String {
        format!(
            "/{}/{}/{}/{}.html",
            self.year, self.month, self.day, self.slug
        )
    }
}

/// Parse an article stem following the `YYYY-M-D-slug` convention.
///
/// The pattern is searched for anywhere in the stem (leftmost match), so a
/// prefix such as `draft-2021-3-5-x` still yields a date.
pub fn parse_dated_name(stem: &str) -> Option<DatedName> {
    let caps = POST_NAME.captures(stem)?;
    let (year, month, day, slug) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    let date = calendar_date(year, month, day);
    Some(DatedName {
        date,
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
        slug: slug.to_string(),
    })
}

fn calendar_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Pipeline stage: assign `date`, `url` and `fileTitle` from the file name.
pub fn derive(mut article: Article) -> Article {
    let stem = article.stem();
    match parse_dated_name(&stem) {
        Some(name) => {
            if name.date.is_none() {
                debug!(
                    "{}: {}-{}-{} is not a calendar date, leaving the article undated",
                    article.source_path.display(),
                    name.year,
                    name.month,
                    name.day
                );
            }
            article.data.date = name.date;
            article.data.url = Some(name.url());
            article.data.file_title = name.slug;
        }
        None => {
            debug!(
                "{}: name does not match YYYY-M-D-slug, no date or permalink",
                article.source_path.display()
            );
            article.data.date = None;
            article.data.url = None;
            article.data.file_title = stem;
        }
    }
    article
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_digit_components() {
        let n = parse_dated_name("2021-3-5-hello-world").unwrap();
        assert_eq!(n.date, Some(ymd(2021, 3, 5)));
        assert_eq!(n.slug, "hello-world");
        assert_eq!(n.url(), "/2021/3/5/hello-world.html");
    }

    #[test]
    fn zero_padded_components_kept_verbatim() {
        let n = parse_dated_name("2021-03-05-hello").unwrap();
        assert_eq!(n.date, Some(ymd(2021, 3, 5)));
        assert_eq!(n.url(), "/2021/03/05/hello.html");
    }

    #[test]
    fn slug_keeps_dashes_and_dots() {
        let n = parse_dated_name("2014-12-31-v1.2-release-notes").unwrap();
        assert_eq!(n.slug, "v1.2-release-notes");
    }

    #[test]
    fn empty_slug_still_matches() {
        let n = parse_dated_name("2014-1-1-").unwrap();
        assert_eq!(n.slug, "");
        assert_eq!(n.url(), "/2014/1/1/.html");
    }

    #[test]
    fn prefixed_name_matches_leftmost() {
        let n = parse_dated_name("draft-2020-2-29-leap").unwrap();
        assert_eq!(n.date, Some(ymd(2020, 2, 29)));
        assert_eq!(n.slug, "leap");
    }

    #[test]
    fn undated_name_does_not_match() {
        assert_eq!(parse_dated_name("not-a-date-name"), None);
        assert_eq!(parse_dated_name("21-3-5-short-year"), None);
        assert_eq!(parse_dated_name("2021-3-5"), None);
    }

    #[test]
    fn impossible_dates_match_without_a_date() {
        let n = parse_dated_name("2021-13-1-bad-month").unwrap();
        assert_eq!(n.date, None);
        assert_eq!(n.slug, "bad-month");
        assert_eq!(n.url(), "/2021/13/1/bad-month.html");

        assert_eq!(parse_dated_name("2021-2-30-bad-day").unwrap().date, None);
        assert_eq!(parse_dated_name("2021-0-10-zero-month").unwrap().date, None);
    }

    #[test]
    fn derive_keeps_permalink_for_impossible_date() {
        let a = Article::new(PathBuf::from("a/2021-13-1-bad-month.md"), String::new());
        let a = derive(a);
        assert_eq!(a.data.date, None);
        assert_eq!(a.data.url.as_deref(), Some("/2021/13/1/bad-month.html"));
        assert_eq!(a.data.file_title, "bad-month");
    }

    #[test]
    fn non_ascii_digits_do_not_match() {
        assert_eq!(parse_dated_name("２０２１-3-5-wide"), None);
    }

    #[test]
    fn derive_sets_date_url_and_file_title() {
        let a = Article::new(PathBuf::from("src/articles/2021-3-5-hello-world.md"), String::new());
        let a = derive(a);
        assert_eq!(a.data.date, Some(ymd(2021, 3, 5)));
        assert_eq!(a.data.url.as_deref(), Some("/2021/3/5/hello-world.html"));
        assert_eq!(a.data.file_title, "hello-world");
    }

    #[test]
    fn derive_leaves_undated_article_without_permalink() {
        let a = Article::new(PathBuf::from("src/articles/not-a-date-name.md"), String::new());
        let a = derive(a);
        assert_eq!(a.data.date, None);
        assert_eq!(a.data.url, None);
        assert_eq!(a.data.file_title, "not-a-date-name");
    }
}

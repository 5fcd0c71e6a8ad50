//! Content loader - turns source files into content records

use chrono::NaiveDate;
use glob::MatchOptions;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use super::{is_markdown_file, read_headers, ContentRecord, MarkdownConverter};
use crate::config::Params;
use crate::error::{Result, SiteError};

/// Date used when a filename carries no `yyyy-mm-dd-` prefix
pub const DEFAULT_DATE: &str = "1970-01-01";

/// Date pattern expected by feed readers
pub const RFC_2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Used when the site parameters carry no `pretty_date_format`
pub const DEFAULT_PRETTY_DATE_FORMAT: &str = "%d %b %Y";

lazy_static! {
    static ref DATE_SLUG: Regex = Regex::new(r"^(?:(\d\d\d\d-\d\d-\d\d)-)?(.+)$").unwrap();
}

/// Loads content records from the filesystem
pub struct ContentLoader<'a> {
    params: &'a Params,
    converter: &'a dyn MarkdownConverter,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    ///
    /// `params` supplies `pretty_date_format`; `converter` handles Markdown bodies.
    pub fn new(params: &'a Params, converter: &'a dyn MarkdownConverter) -> Self {
        Self { params, converter }
    }

    /// Load one source file.
    ///
    /// A Markdown conversion failure is logged and the raw body kept. An
    /// unparseable `date` is returned as [`SiteError::DateFormat`].
    pub fn load(&self, path: &Path) -> Result<ContentRecord> {
        let text = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;

        let (date, slug) = split_date_slug(&file_stem(path));
        let mut fields = Params::new().with("date", date).with("slug", slug);

        let headers = read_headers(&text);
        let body = headers.body(&text);
        fields.extend(headers.fields);

        let content = if is_markdown_file(path) {
            match self.converter.convert(body) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Cannot render Markdown in {:?}: {}", path, e);
                    body.to_string()
                }
            }
        } else {
            body.to_string()
        };

        let date_str = fields.get("date").unwrap_or(DEFAULT_DATE).to_string();
        let date = parse_date(&date_str)?;
        let pretty_format = self
            .params
            .get("pretty_date_format")
            .unwrap_or(DEFAULT_PRETTY_DATE_FORMAT);

        fields.insert("content", content);
        fields.insert("pretty_date", format_date(date, pretty_format)?);
        fields.insert("rfc_2822_date", format_date(date, RFC_2822_FORMAT)?);

        Ok(ContentRecord::new(path.to_path_buf(), date, fields))
    }

    /// Load every file matching `pattern`, most recent first
    pub fn load_all(&self, pattern: &str) -> Result<Vec<ContentRecord>> {
        let mut records = source_files(pattern)?
            .iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>>>()?;
        sort_by_date_desc(&mut records);
        Ok(records)
    }
}

/// Files matching a glob pattern. `*` does not match a leading dot.
pub fn source_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let entries = glob::glob_with(pattern, options).map_err(|source| SiteError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => tracing::debug!("Skipping non-file {:?}", path),
            Err(e) => tracing::warn!("Cannot read {:?}: {}", e.path(), e.error()),
        }
    }
    Ok(files)
}

/// Stable sort, newest first
pub fn sort_by_date_desc(records: &mut [ContentRecord]) {
    records.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// File name up to its first dot
fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// Split `2020-01-02-hello` into (`2020-01-02`, `hello`).
///
/// Stems without a date prefix get [`DEFAULT_DATE`] and keep the whole stem as slug.
pub fn split_date_slug(stem: &str) -> (String, String) {
    match DATE_SLUG.captures(stem) {
        Some(caps) => (
            caps.get(1)
                .map_or(DEFAULT_DATE, |m| m.as_str())
                .to_string(),
            caps[2].to_string(),
        ),
        None => (DEFAULT_DATE.to_string(), stem.to_string()),
    }
}

/// Parse a `yyyy-mm-dd` calendar date
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| SiteError::DateFormat {
        date: date.to_string(),
        message: e.to_string(),
    })
}

/// Format a date (at midnight) with a strftime pattern
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    let datetime = date.and_time(chrono::NaiveTime::MIN);
    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).map_err(|_| SiteError::DateFormat {
        date: date.to_string(),
        message: format!("cannot format with pattern {:?}", pattern),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CommonMark, MarkdownError};
    use tempfile::TempDir;

    struct FailingConverter;

    impl MarkdownConverter for FailingConverter {
        fn convert(&self, _markdown: &str) -> std::result::Result<String, MarkdownError> {
            Err(MarkdownError("converter unavailable".to_string()))
        }
    }

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_split_date_slug() {
        assert_eq!(
            split_date_slug("2020-01-02-hello"),
            ("2020-01-02".to_string(), "hello".to_string())
        );
        assert_eq!(
            split_date_slug("about"),
            ("1970-01-01".to_string(), "about".to_string())
        );
        // a bare date prefix with nothing after it is the slug itself
        assert_eq!(
            split_date_slug("2020-01-02-"),
            ("1970-01-01".to_string(), "2020-01-02-".to_string())
        );
    }

    #[test]
    fn test_file_stem_stops_at_first_dot() {
        assert_eq!(file_stem(Path::new("x/2020-01-02-hello.md")), "2020-01-02-hello");
        assert_eq!(file_stem(Path::new("notes.draft.md")), "notes");
    }

    #[test]
    fn test_format_date() {
        let date = parse_date("2020-01-02").unwrap();
        assert_eq!(format_date(date, "%d %b %Y").unwrap(), "02 Jan 2020");
        assert_eq!(
            format_date(date, RFC_2822_FORMAT).unwrap(),
            "Thu, 02 Jan 2020 00:00:00 +0000"
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("someday"),
            Err(SiteError::DateFormat { .. })
        ));
        assert!(parse_date("2021-02-30").is_err());
    }

    #[test]
    fn test_load_markdown_post() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "2020-01-02-hello.md",
            "<!-- title: Hello -->\n\n# Heading\n\nSome *text*.\n",
        );

        let params = Params::defaults();
        let converter = CommonMark::new();
        let record = ContentLoader::new(&params, &converter).load(&path).unwrap();

        assert_eq!(record.get("date"), Some("2020-01-02"));
        assert_eq!(record.slug(), "hello");
        assert_eq!(record.title(), "Hello");
        assert!(record.content().contains("<h1>Heading</h1>"));
        assert!(record.content().contains("<em>text</em>"));
        assert_eq!(record.get("pretty_date"), Some("02 Jan 2020"));
        assert_eq!(
            record.get("rfc_2822_date"),
            Some("Thu, 02 Jan 2020 00:00:00 +0000")
        );
        assert_eq!(record.source(), path.as_path());
    }

    #[test]
    fn test_load_html_page_is_not_converted() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "about.html", "<!-- title: About -->\n<p>*raw*</p>\n");

        let params = Params::defaults();
        let converter = CommonMark::new();
        let record = ContentLoader::new(&params, &converter).load(&path).unwrap();

        assert_eq!(record.get("date"), Some("1970-01-01"));
        assert_eq!(record.slug(), "about");
        assert_eq!(record.content(), "<p>*raw*</p>\n");
        assert_eq!(record.get("pretty_date"), Some("01 Jan 1970"));
    }

    #[test]
    fn test_pretty_date_format_from_params() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "2021-06-01-x.html", "body");

        let params = Params::new().with("pretty_date_format", "%Y/%m/%d");
        let converter = CommonMark::new();
        let record = ContentLoader::new(&params, &converter).load(&path).unwrap();
        assert_eq!(record.get("pretty_date"), Some("2021/06/01"));
    }

    #[test]
    fn test_invalid_pretty_date_format_is_an_error() {
        let date = parse_date("2020-01-02").unwrap();
        assert!(matches!(
            format_date(date, "%Q %Y"),
            Err(SiteError::DateFormat { .. })
        ));

        let dir = TempDir::new().unwrap();
        let path = write(&dir, "2020-01-02-x.html", "body");
        let params = Params::defaults().with("pretty_date_format", "%Q");
        let converter = CommonMark::new();
        let err = ContentLoader::new(&params, &converter)
            .load(&path)
            .unwrap_err();
        assert!(matches!(err, SiteError::DateFormat { ref date, .. } if date == "2020-01-02"));
    }

    #[test]
    fn test_header_date_overrides_filename() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "2020-01-02-x.html", "<!-- date: 2022-12-31 -->\nbody");

        let params = Params::defaults();
        let converter = CommonMark::new();
        let record = ContentLoader::new(&params, &converter).load(&path).unwrap();
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
    }

    #[test]
    fn test_bad_header_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "x.html", "<!-- date: yesterday -->\nbody");

        let params = Params::defaults();
        let converter = CommonMark::new();
        let err = ContentLoader::new(&params, &converter)
            .load(&path)
            .unwrap_err();
        assert!(matches!(err, SiteError::DateFormat { ref date, .. } if date == "yesterday"));
    }

    #[test]
    fn test_markdown_failure_keeps_raw_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "post.md", "<!-- title: T -->\n# Raw *markdown*\n");

        let params = Params::defaults();
        let record = ContentLoader::new(&params, &FailingConverter)
            .load(&path)
            .unwrap();
        assert_eq!(record.content(), "# Raw *markdown*\n");
        assert_eq!(record.title(), "T");
    }

    #[test]
    fn test_load_all_sorted_and_skips_dotfiles() {
        let dir = TempDir::new().unwrap();
        write(&dir, "2021-06-01-b.md", "b");
        write(&dir, "2019-03-03-c.md", "c");
        write(&dir, "2022-12-31-a.md", "a");
        write(&dir, ".2030-01-01-hidden.md", "hidden");

        let pattern = format!("{}/*.md", glob::Pattern::escape(&dir.path().to_string_lossy()));
        let params = Params::defaults();
        let converter = CommonMark::new();
        let records = ContentLoader::new(&params, &converter)
            .load_all(&pattern)
            .unwrap();

        let dates: Vec<_> = records.iter().map(|r| r.get("date").unwrap()).collect();
        assert_eq!(dates, vec!["2022-12-31", "2021-06-01", "2019-03-03"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            source_files("content/[*.md"),
            Err(SiteError::Pattern { .. })
        ));
    }
}

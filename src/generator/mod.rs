//! Generator module - renders content records into output files
//!
//! [`Generator::make_pages`] writes one file per source file and hands the
//! loaded records back, newest first. [`Generator::make_list`] takes such a
//! collection and writes a single aggregate file (an HTML index or an XML
//! feed, depending on the layouts it is given).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Params;
use crate::content::loader::{sort_by_date_desc, source_files};
use crate::content::{CommonMark, ContentLoader, ContentRecord, MarkdownConverter};
use crate::error::{Result, SiteError};
use crate::render::{render, truncate, DEFAULT_SUMMARY_WORDS};

/// Page and list generator
pub struct Generator {
    converter: Box<dyn MarkdownConverter>,
    summary_words: usize,
}

impl Generator {
    /// Create a generator converting Markdown with [`CommonMark`]
    pub fn new() -> Self {
        Self::with_converter(Box::new(CommonMark::new()))
    }

    pub fn with_converter(converter: Box<dyn MarkdownConverter>) -> Self {
        Self {
            converter,
            summary_words: DEFAULT_SUMMARY_WORDS,
        }
    }

    /// Number of words kept in each list item's `summary`
    pub fn summary_words(mut self, words: usize) -> Self {
        self.summary_words = words;
        self
    }

    /// Loader sharing this generator's Markdown converter
    pub fn loader<'a>(&'a self, params: &'a Params) -> ContentLoader<'a> {
        ContentLoader::new(params, self.converter.as_ref())
    }

    /// Render every file matching `src` into `layout` and write it to `dst`.
    ///
    /// `dst` and `layout` are templates, resolved against `params` overridden
    /// by the record's own fields. A record with `render: yes` first has its
    /// content rendered against those same parameters. Returns the records
    /// sorted by date, most recent first.
    pub fn make_pages(
        &self,
        src: &str,
        dst: &str,
        layout: &str,
        params: &Params,
    ) -> Result<Vec<ContentRecord>> {
        let loader = self.loader(params);
        let mut records = Vec::new();

        for src_path in source_files(src)? {
            let mut record = loader.load(&src_path)?;
            let mut page_params = params.merged(record.fields());

            if page_params.get("render") == Some("yes") {
                let rendered = render(page_params.get("content").unwrap_or_default(), &page_params);
                page_params.insert("content", rendered.clone());
                record.set_content(rendered);
            }

            let dst_path = render(dst, &page_params);
            let output = render(layout, &page_params);

            tracing::info!("Rendering {} => {} ...", src_path.display(), dst_path);
            write_output(Path::new(&dst_path), &output)?;

            records.push(record);
        }

        sort_by_date_desc(&mut records);
        Ok(records)
    }

    /// Render `records` in the given order with `item_layout`, concatenate
    /// the results into `content` and write `list_layout` to `dst`.
    ///
    /// Each item additionally sees a `summary` field: its content with tags
    /// stripped, cut to the configured number of words. Returns the path
    /// written.
    pub fn make_list(
        &self,
        records: &[ContentRecord],
        dst: &str,
        list_layout: &str,
        item_layout: &str,
        params: &Params,
    ) -> Result<PathBuf> {
        let items: String = records
            .iter()
            .map(|record| {
                let mut item_params = params.merged(record.fields());
                item_params.insert("summary", truncate(record.content(), self.summary_words));
                render(item_layout, &item_params)
            })
            .collect();

        let list_params = params.clone().with("content", items);
        let dst_path = render(dst, &list_params);
        let output = render(list_layout, &list_params);

        tracing::info!("Rendering list => {} ...", dst_path);
        let dst_path = PathBuf::from(dst_path);
        write_output(&dst_path, &output)?;

        Ok(dst_path)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `text` to `path`, creating missing parent directories and
/// replacing any existing file
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
    }
    fs::write(path, text).map_err(|e| SiteError::io(path, e))
}

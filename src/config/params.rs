//! Site parameters (params.json / params.yml)

use chrono::{Datelike, Local};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SiteError};

/// Keys that must hold a non-empty value once loading is done
const REQUIRED_KEYS: &[&str] = &["site_title", "output_dir", "theme", "pretty_date_format"];

/// A flat, insertion-ordered `key -> value` mapping.
///
/// Used both for site-wide parameters and for the fields of a content
/// record. Layers are combined with [`Params::merged`], where the argument
/// wins on key collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(IndexMap<String, String>);

/// A scalar value accepted in a parameter file
#[derive(Deserialize)]
#[serde(untagged)]
enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null(()),
}

impl ParamValue {
    fn into_string(self) -> String {
        match self {
            ParamValue::Str(s) => s,
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Null(()) => String::new(),
        }
    }
}

impl Params {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Built-in site parameters, the lowest layer of every render
    pub fn defaults() -> Self {
        Self::new()
            .with("site_title", "Lorem Ipsum")
            .with("subtitle", "Dolor sit amet")
            .with("output_dir", "_site")
            .with("theme", "default")
            .with("author", "Admin")
            .with("pretty_date_format", "%d %b %Y")
            .with("site_url", "http://localhost:8000")
            .with("current_year", Local::now().year().to_string())
            .with("base_path", "")
    }

    /// Load the defaults overlaid with `params.json`, or `params.yml` when
    /// there is no JSON file, from the site root.
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let mut params = Self::defaults();

        let json_path = base_dir.join("params.json");
        let yaml_path = base_dir.join("params.yml");

        if json_path.is_file() {
            params.extend(Self::from_json_file(&json_path)?);
            tracing::debug!("Loaded parameters from {:?}", json_path);
        } else if yaml_path.is_file() {
            params.extend(Self::from_yaml_file(&yaml_path)?);
            tracing::debug!("Loaded parameters from {:?}", yaml_path);
        }

        params.validate(base_dir)?;
        Ok(params)
    }

    fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        let raw: IndexMap<String, ParamValue> =
            serde_json::from_str(&text).map_err(|e| SiteError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_raw(raw))
    }

    fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        let raw: IndexMap<String, ParamValue> =
            serde_yaml::from_str(&text).map_err(|e| SiteError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: IndexMap<String, ParamValue>) -> Self {
        Self(
            raw.into_iter()
                .map(|(k, v)| (k, v.into_string()))
                .collect(),
        )
    }

    fn validate(&self, base_dir: &Path) -> Result<()> {
        for key in REQUIRED_KEYS {
            if self.get(key).map_or(true, |v| v.trim().is_empty()) {
                return Err(SiteError::Config {
                    path: base_dir.to_path_buf(),
                    message: format!("parameter {:?} must not be empty", key),
                });
            }
        }
        Ok(())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Overwrite entries with those of `other`
    pub fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// A copy of `self` with `other` layered on top
    pub fn merged(&self, other: &Params) -> Params {
        let mut out = self.clone();
        for (k, v) in other.iter() {
            out.insert(k, v);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Document file filtering and discovery with glob pattern support.
//!
//! Only markup files are candidates for documents. On top of that, callers can
//! narrow the set with include/exclude glob patterns, matched against the path
//! relative to the site root (e.g. `_posts/2019/*.md`).

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::BlogstatsError;
use crate::Result;

/// Extensions recognized as document markup.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "md", "markdown", "mkdn", "mkd", "html", "htm", "textile",
];

/// Configuration for document file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all document files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all document files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. It has a document extension
    /// 2. It matches at least one include pattern (or include is empty)
    /// 3. It doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        if !is_document_file(path) {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| BlogstatsError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Discover document files under `dir`.
///
/// Filter patterns are matched against paths relative to `base`. Hidden files
/// and directories are skipped. A missing `dir` yields no files, since a site
/// without `_drafts/` (or even `_posts/`) is perfectly valid.
pub fn discover_files(
    base: impl AsRef<Path>,
    dir: impl AsRef<Path>,
    filter: &FilterConfig,
) -> Vec<PathBuf> {
    let base = base.as_ref();
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Vec::new();
    }

    let walker = WalkDir::new(dir).follow_links(true).into_iter();

    let mut files: Vec<PathBuf> = walker
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_str().is_some_and(is_hidden)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let relative = path.strip_prefix(base).unwrap_or(path);
            filter.matches(relative)
        })
        .collect();

    files.sort();
    files
}

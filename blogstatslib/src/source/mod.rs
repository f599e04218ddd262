//! Source discovery: find and read the documents to analyze.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Document model**: [`Document`], the [`DocumentSource`] trait and the
//!   in-memory [`Site`]
//! - **File filtering**: Include/exclude document files with glob patterns
//! - **Loading**: Read a Jekyll-style source tree (`_posts/`, `_drafts/`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use blogstatslib::source::{load_site, FilterConfig, LoadOptions};
//!
//! let filter = FilterConfig::new().exclude("_posts/archive/**")?;
//! let site = load_site(".", &LoadOptions::new().filter(filter))?;
//! ```

pub mod document;
pub mod filter;
pub mod loader;

pub use document::{Document, DocumentSource, Site, UNTITLED};
pub use filter::{discover_files, FilterConfig, DOCUMENT_EXTENSIONS};
pub use loader::{load_site, parse_date, parse_document, read_document, LoadOptions};

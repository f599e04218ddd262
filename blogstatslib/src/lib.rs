//! # blogstatslib
//!
//! Aggregate statistics for a collection of dated, tagged blog posts.
//!
//! ## Overview
//!
//! Given the posts of a site, the library computes one immutable
//! [`StatsRecord`]: post and word totals, reading time, averages, the longest
//! and shortest posts, the first and last posts, posting frequency, and
//! breakdowns by year, month, weekday, tag and category. The record can be
//! serialized directly or rendered as a text report.
//!
//! The pipeline has three stages:
//!
//! - **source**: The document model and a loader for Jekyll-style sites
//!   (`_posts/YYYY-MM-DD-slug.md` with YAML front matter, `_drafts/`)
//! - **data**: Word counting with markup stripping, tag normalization and the
//!   single-pass [`StatsCalculator`]
//! - **output**: The text [`Formatter`]
//!
//! ## Example
//!
//! ```rust
//! use blogstatslib::{CalculateOptions, Document, Formatter, Site, StatsCalculator};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let site = Site::from_documents(vec![
//!     Document::new(date, "/2024/01/15/hello.html", "Hello world this is a test post.")
//!         .title("Hello")
//!         .tags(["rust", "blogging,"]),
//! ]);
//!
//! let record = StatsCalculator::new(&site, CalculateOptions::new()).calculate();
//! assert_eq!(record.total_posts, 1);
//! assert_eq!(record.total_words, 7);
//! assert_eq!(record.tags[1].name, "blogging");
//!
//! let report = Formatter::new(&record).to_report();
//! assert!(report.contains("Posts: 1 (7 words, ~1m read time)"));
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use data::{
    calculate, word_count, CalculateOptions, DatedPost, MonthCount, NameCount, PostSummary,
    StatsCalculator, StatsRecord, WeekdayCounts, YearCount,
};
pub use error::BlogstatsError;
pub use output::Formatter;
pub use source::{load_site, Document, DocumentSource, FilterConfig, LoadOptions, Site};

/// Result type for blogstatslib operations
pub type Result<T> = std::result::Result<T, BlogstatsError>;

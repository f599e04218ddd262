//! Statistics: count words and aggregate posts into a record.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Word counting**: Markup stripping and word/reading-time estimates
//! - **Tags**: Tag and category normalization and ranking
//! - **Statistics**: The [`StatsRecord`] data structure and its parts
//! - **Calculation**: [`StatsCalculator`], the single-pass aggregation
//!
//! ## Example
//!
//! ```rust,ignore
//! use blogstatslib::data::{StatsCalculator, CalculateOptions};
//!
//! let record = StatsCalculator::new(&site, CalculateOptions::new()).calculate();
//! println!("Total words: {}", record.total_words);
//! ```

pub mod calculator;
pub mod stats;
pub mod tags;
pub mod words;

pub use calculator::{calculate, CalculateOptions, StatsCalculator};
pub use stats::{
    DatedPost, MonthCount, NameCount, PostSummary, StatsRecord, WeekdayCounts, YearCount,
    WEEKDAY_NAMES,
};
pub use tags::{normalize_filter, normalize_tag, NameCounter};
pub use words::{reading_minutes, strip_markup, word_count, WORDS_PER_MINUTE};

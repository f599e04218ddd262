//! Output formatting: present a statistics record as text.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **Formatter**: Renders a [`StatsRecord`](crate::StatsRecord) as a
//!   multi-line report with a posts-by-year bar chart
//! - **Helpers**: Thousands separators, reading time and title truncation
//!
//! The formatter is a pure presentation layer. All counting, ranking and
//! rounding happens in the data stage; structured (JSON) output is simply the
//! serialized record.
//!
//! ## Example
//!
//! ```rust,ignore
//! use blogstatslib::output::Formatter;
//!
//! println!("{}", Formatter::new(&record).to_report());
//! ```

pub mod report;

pub use report::{format_number, format_reading_time, truncate, Formatter, NO_POSTS};

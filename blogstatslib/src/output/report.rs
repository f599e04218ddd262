//! Human-readable text report for a [`StatsRecord`].
//!
//! The layout is fixed: banner, summary lines, a posts-by-year bar chart, then
//! the optional tags, categories and drafts sections, and a closing rule.
//! Formatting is a pure function of the record.

use num_format::{Locale, ToFormattedString};

use crate::data::stats::{NameCount, StatsRecord, YearCount};

/// Report emitted when there is nothing to summarize.
pub const NO_POSTS: &str = "No posts found.";

const RULE_WIDTH: usize = 35;
const BAR_WIDTH: usize = 20;
const CHART_YEARS: usize = 10;
const TOP_TAGS: usize = 10;
const TITLE_WIDTH: usize = 30;

/// Renders a [`StatsRecord`] as a multi-line text report.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    stats: &'a StatsRecord,
}

impl<'a> Formatter<'a> {
    pub fn new(stats: &'a StatsRecord) -> Self {
        Self { stats }
    }

    /// The full report, lines joined with `\n`.
    pub fn to_report(&self) -> String {
        let stats = self.stats;
        if stats.total_posts == 0 {
            return NO_POSTS.to_string();
        }

        let rule = "\u{2500}".repeat(RULE_WIDTH);
        let mut lines = vec![
            String::new(),
            "\u{1F4CA} Site Statistics".to_string(),
            rule.clone(),
            self.post_summary(),
        ];
        lines.extend(self.averages_line());
        lines.extend(self.date_range_line());
        lines.push(self.frequency_line());

        lines.push(String::new());
        lines.push(posts_by_year_chart(&stats.posts_by_year));

        if !stats.tags.is_empty() {
            lines.push(String::new());
            lines.push(top_tags(&stats.tags));
        }

        if !stats.categories.is_empty() {
            lines.push(String::new());
            lines.push(format!("Categories:\n  {}", name_counts(&stats.categories)));
        }

        if stats.drafts_count > 0 {
            lines.push(String::new());
            lines.push(format!("Drafts: {}", stats.drafts_count));
        }

        lines.push(rule);
        lines.push(String::new());

        lines.join("\n")
    }

    fn post_summary(&self) -> String {
        format!(
            "Posts: {} ({} words, ~{} read time)",
            self.stats.total_posts,
            format_number(self.stats.total_words),
            format_reading_time(self.stats.reading_minutes)
        )
    }

    fn averages_line(&self) -> Option<String> {
        let longest = self.stats.longest_post.as_ref()?;
        Some(format!(
            "Avg: {} words | Longest: \"{}\" ({} words)",
            format_number(self.stats.average_words),
            truncate(&longest.title, TITLE_WIDTH),
            format_number(longest.words)
        ))
    }

    fn date_range_line(&self) -> Option<String> {
        let first = self.stats.first_post.as_ref()?;
        let last = self.stats.last_post.as_ref()?;
        Some(format!(
            "First: {} | Last: {} ({:.1} years)",
            first.date, last.date, self.stats.years_active
        ))
    }

    fn frequency_line(&self) -> String {
        format!("Frequency: {:.1} posts/month", self.stats.posts_per_month)
    }
}

/// Bar chart of the most recent years; bars scale against the busiest year.
fn posts_by_year_chart(years: &[YearCount]) -> String {
    let Some(max_count) = years.iter().map(|y| y.count).max() else {
        return String::new();
    };

    let mut lines = vec!["Posts by Year:".to_string()];
    for year in years.iter().take(CHART_YEARS) {
        let bar_length = (year.count as f64 / max_count as f64 * BAR_WIDTH as f64).round() as usize;
        lines.push(format!(
            "  {}: {} {}",
            year.year,
            "\u{2588}".repeat(bar_length),
            year.count
        ));
    }
    lines.join("\n")
}

fn top_tags(tags: &[NameCount]) -> String {
    let shown = &tags[..tags.len().min(TOP_TAGS)];
    format!("Top {} Tags:\n  {}", shown.len(), name_counts(shown))
}

fn name_counts(items: &[NameCount]) -> String {
    items
        .iter()
        .map(|item| format!("{} ({})", item.name, item.count))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Format a number with comma thousands separators.
pub fn format_number(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Format minutes as `Nm`, or `Hh Mm` from an hour up.
pub fn format_reading_time(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

//! The statistics engine.
//!
//! [`StatsCalculator`] turns the posts of a [`DocumentSource`] into one
//! [`StatsRecord`]. The result depends only on the documents and the
//! [`CalculateOptions`]; the generation timestamp is the single exception.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, SubsecRound, Utc};
use tracing::debug;

use crate::source::{Document, DocumentSource};

use super::stats::{DatedPost, MonthCount, PostSummary, StatsRecord, WeekdayCounts, YearCount};
use super::tags::{normalize_filter, normalize_tag, NameCounter};
use super::words::{reading_minutes, word_count};

/// Options for calculating statistics.
#[derive(Debug, Clone, Default)]
pub struct CalculateOptions {
    /// Aggregate drafts alongside published posts
    pub include_drafts: bool,
    /// Keep only posts carrying at least one of these tags (empty = all)
    pub tag_filter: Vec<String>,
}

impl CalculateOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include drafts in the aggregation.
    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Restrict to posts tagged with any of `tags`.
    pub fn filter_tags(mut self, tags: Vec<String>) -> Self {
        self.tag_filter = tags;
        self
    }
}

/// Computes a [`StatsRecord`] from a document source.
#[derive(Debug)]
pub struct StatsCalculator<'a, S: DocumentSource + ?Sized> {
    source: &'a S,
    include_drafts: bool,
    filter_tags: Option<Vec<String>>,
}

impl<'a, S: DocumentSource + ?Sized> StatsCalculator<'a, S> {
    pub fn new(source: &'a S, options: CalculateOptions) -> Self {
        Self {
            source,
            include_drafts: options.include_drafts,
            filter_tags: normalize_filter(&options.tag_filter),
        }
    }

    /// The posts that take part in the aggregation, in source order.
    ///
    /// Published posts come first, followed by drafts when they are included.
    /// With a tag filter, only posts sharing a normalized tag with it remain.
    pub fn collect_posts(&self) -> Vec<&'a Document> {
        let source = self.source;
        let mut posts: Vec<&'a Document> = source.posts().iter().collect();
        if self.include_drafts {
            posts.extend(source.drafts());
        }

        if let Some(filter) = &self.filter_tags {
            posts.retain(|post| {
                post.tags
                    .iter()
                    .any(|tag| filter.contains(&normalize_tag(tag)))
            });
        }

        posts
    }

    /// Drafts present in the source, independent of `include_drafts`.
    pub fn drafts_count(&self) -> usize {
        self.source.drafts().len()
    }

    /// Calculate statistics, stamped with the current time.
    pub fn calculate(&self) -> StatsRecord {
        self.calculate_at(Utc::now().trunc_subsecs(0))
    }

    /// Calculate statistics with an explicit generation timestamp.
    pub fn calculate_at(&self, generated_at: DateTime<Utc>) -> StatsRecord {
        let posts = self.collect_posts();
        if posts.is_empty() {
            debug!("no posts to aggregate");
            return StatsRecord::empty(generated_at);
        }

        let words: Vec<u64> = posts.iter().map(|p| word_count(&p.body)).collect();
        let total_posts = posts.len();
        let total_words: u64 = words.iter().sum();

        debug!(total_posts, total_words, "aggregating posts");

        // First occurrence wins on ties for both extremes.
        let mut longest = 0;
        let mut shortest = 0;
        for (i, &count) in words.iter().enumerate() {
            if count > words[longest] {
                longest = i;
            }
            if count < words[shortest] {
                shortest = i;
            }
        }

        let mut by_date = posts.clone();
        by_date.sort_by_key(|p| p.date);
        let first = by_date[0];
        let last = by_date[by_date.len() - 1];

        let mut tags = NameCounter::new();
        let mut categories = NameCounter::new();
        for post in &posts {
            tags.extend(&post.tags);
            categories.extend(&post.categories);
        }

        StatsRecord {
            generated_at,
            total_posts,
            total_words,
            reading_minutes: reading_minutes(total_words),
            average_words: (total_words as f64 / total_posts as f64).round() as u64,
            longest_post: Some(summary(posts[longest], words[longest])),
            shortest_post: Some(summary(posts[shortest], words[shortest])),
            first_post: Some(dated(first)),
            last_post: Some(dated(last)),
            years_active: years_active(first, last),
            posts_per_month: posts_per_month(total_posts, first, last),
            posts_by_year: posts_by_year(&posts),
            posts_by_month: posts_by_month(&posts),
            posts_by_day_of_week: posts_by_day_of_week(&posts),
            tags: tags.ranked(),
            categories: categories.ranked(),
            drafts_count: self.drafts_count(),
        }
    }
}

/// Calculate statistics for a source in one call.
pub fn calculate<S: DocumentSource + ?Sized>(source: &S, options: CalculateOptions) -> StatsRecord {
    StatsCalculator::new(source, options).calculate()
}

fn summary(post: &Document, words: u64) -> PostSummary {
    PostSummary {
        title: post.display_title().to_string(),
        url: post.url.clone(),
        words,
    }
}

fn dated(post: &Document) -> DatedPost {
    DatedPost {
        title: post.display_title().to_string(),
        url: post.url.clone(),
        date: post.date.date(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn years_active(first: &Document, last: &Document) -> f64 {
    let days = (last.date - first.date).num_seconds() as f64 / 86_400.0;
    round1(days / 365.25)
}

fn posts_per_month(count: usize, first: &Document, last: &Document) -> f64 {
    let months = (last.date.year() - first.date.year()) * 12
        + (last.date.month() as i32 - first.date.month() as i32)
        + 1;
    round1(count as f64 / months.max(1) as f64)
}

fn posts_by_year(posts: &[&Document]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(post.date.year()).or_default() += 1;
    }
    counts
        .into_iter()
        .rev()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

fn posts_by_month(posts: &[&Document]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(post.date.format("%Y-%m").to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .rev()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

fn posts_by_day_of_week(posts: &[&Document]) -> WeekdayCounts {
    let mut days = WeekdayCounts::new();
    for post in posts {
        days.increment(post.date.weekday());
    }
    days
}

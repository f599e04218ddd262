//! The statistics record and its parts.
//!
//! [`StatsRecord`] is the complete, immutable result of one calculation pass.
//! It serializes to the JSON shape consumed by site templates: snake_case
//! keys, `null` for absent post summaries, ISO-8601 timestamps and
//! `YYYY-MM-DD` dates.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Lowercase weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// A post identified by title and URL, with its word count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub url: String,
    pub words: u64,
}

/// A post identified by title and URL, with its publication date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedPost {
    pub title: String,
    pub url: String,
    pub date: NaiveDate,
}

/// Number of posts in a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Number of posts in a `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Number of posts carrying a tag or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

impl NameCount {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Posts per weekday. All seven days are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCounts {
    pub sunday: usize,
    pub monday: usize,
    pub tuesday: usize,
    pub wednesday: usize,
    pub thursday: usize,
    pub friday: usize,
    pub saturday: usize,
}

impl WeekdayCounts {
    /// All days at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, day: Weekday) -> &mut usize {
        match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }

    /// Count one more post on `day`.
    pub fn increment(&mut self, day: Weekday) {
        *self.slot(day) += 1;
    }

    /// Posts on `day`.
    pub fn get(&self, day: Weekday) -> usize {
        self.to_array()[day.num_days_from_sunday() as usize]
    }

    /// Counts in Sunday-first order.
    pub fn to_array(&self) -> [usize; 7] {
        [
            self.sunday,
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
        ]
    }

    /// `(name, count)` pairs in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> {
        WEEKDAY_NAMES.into_iter().zip(self.to_array())
    }

    /// Sum over all days.
    pub fn total(&self) -> usize {
        self.to_array().iter().sum()
    }
}

/// Aggregate statistics over a set of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// When the record was computed (UTC, whole seconds)
    #[serde(with = "timestamp")]
    pub generated_at: DateTime<Utc>,
    pub total_posts: usize,
    pub total_words: u64,
    /// `ceil(total_words / 200)`
    pub reading_minutes: u64,
    /// `round(total_words / total_posts)`
    pub average_words: u64,
    pub longest_post: Option<PostSummary>,
    pub shortest_post: Option<PostSummary>,
    pub first_post: Option<DatedPost>,
    pub last_post: Option<DatedPost>,
    /// Days between first and last post over 365.25, one decimal
    pub years_active: f64,
    /// Posts over the inclusive month span, one decimal
    pub posts_per_month: f64,
    /// Newest year first
    pub posts_by_year: Vec<YearCount>,
    /// Newest month first
    pub posts_by_month: Vec<MonthCount>,
    pub posts_by_day_of_week: WeekdayCounts,
    /// Most used first, ties in first-seen order
    pub tags: Vec<NameCount>,
    /// Most used first, ties in first-seen order
    pub categories: Vec<NameCount>,
    /// Drafts present in the site, whether or not they were aggregated
    pub drafts_count: usize,
}

impl StatsRecord {
    /// The record for a site with no matching posts.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            total_posts: 0,
            total_words: 0,
            reading_minutes: 0,
            average_words: 0,
            longest_post: None,
            shortest_post: None,
            first_post: None,
            last_post: None,
            years_active: 0.0,
            posts_per_month: 0.0,
            posts_by_year: Vec::new(),
            posts_by_month: Vec::new(),
            posts_by_day_of_week: WeekdayCounts::new(),
            tags: Vec::new(),
            categories: Vec::new(),
            drafts_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_posts == 0
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ` timestamps.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

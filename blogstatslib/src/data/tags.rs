//! Tag and category normalization and ranking.

use indexmap::IndexMap;
use lazy_regex::regex;

use super::stats::NameCount;

/// Normalize a raw tag or category.
///
/// Trims whitespace, drops a trailing run of `,` `;` `:` and trims again, so
/// `"opensource, "` and `"opensource"` are the same tag. An all-punctuation
/// tag normalizes to the empty string and is still a tag.
pub fn normalize_tag(raw: &str) -> String {
    regex!(r"[,;:]+$").replace(raw.trim(), "").trim().to_string()
}

/// Normalize a tag filter list.
///
/// Entries that normalize to nothing are dropped; `None` means no filtering.
pub fn normalize_filter(tags: &[String]) -> Option<Vec<String>> {
    let normalized: Vec<String> = tags
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect();

    (!normalized.is_empty()).then_some(normalized)
}

/// Occurrence counter that remembers first-seen order.
#[derive(Debug, Clone, Default)]
pub struct NameCounter {
    counts: IndexMap<String, usize>,
}

impl NameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of the normalized form of `raw`.
    pub fn add(&mut self, raw: &str) {
        *self.counts.entry(normalize_tag(raw)).or_default() += 1;
    }

    /// Count every entry of `raws`.
    pub fn extend<I, S>(&mut self, raws: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in raws {
            self.add(raw.as_ref());
        }
    }

    /// Names ranked by count, most used first; ties keep first-seen order.
    pub fn ranked(self) -> Vec<NameCount> {
        let mut ranked: Vec<NameCount> = self
            .counts
            .into_iter()
            .map(|(name, count)| NameCount { name, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

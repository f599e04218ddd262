//! The document model consumed by the statistics engine.
//!
//! A [`Document`] is a read-only record of one post or draft. Anything that
//! can hand out published posts (and optionally drafts) implements
//! [`DocumentSource`]; [`Site`] is the in-memory implementation produced by
//! the loader and used directly in tests.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Title reported for documents that have none.
pub const UNTITLED: &str = "(untitled)";

/// A single dated content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Title from front matter, if any
    pub title: Option<String>,
    /// Publication date (local wall-clock time)
    pub date: NaiveDateTime,
    /// Site-relative URL
    pub url: String,
    /// Raw markup body, front matter removed
    pub body: String,
    /// Raw tag strings, not yet normalized
    pub tags: Vec<String>,
    /// Raw category strings, not yet normalized
    pub categories: Vec<String>,
    /// Whether this document is an unpublished draft
    pub draft: bool,
    /// Front matter keys that are not modelled above
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, serde_yaml::Value>,
}

impl Document {
    /// Create a published post with no title, tags or categories.
    pub fn new(date: NaiveDateTime, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: None,
            date,
            url: url.into(),
            body: body.into(),
            tags: Vec::new(),
            categories: Vec::new(),
            draft: false,
            metadata: IndexMap::new(),
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the raw tag list.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the raw category list.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as draft.
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Title for display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }
}

/// Anything that exposes a site's posts and drafts.
pub trait DocumentSource {
    /// Published posts, in site order.
    fn posts(&self) -> &[Document];

    /// Draft documents. Sources without a drafts notion return nothing.
    fn drafts(&self) -> &[Document] {
        &[]
    }
}

/// An in-memory site: published posts plus drafts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub posts: Vec<Document>,
    pub drafts: Vec<Document>,
}

impl Site {
    /// Create an empty site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a site from a mixed list, splitting on [`Document::draft`].
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let (drafts, posts) = documents.into_iter().partition(|d| d.draft);
        Self { posts, drafts }
    }
}

impl DocumentSource for Site {
    fn posts(&self) -> &[Document] {
        &self.posts
    }

    fn drafts(&self) -> &[Document] {
        &self.drafts
    }
}

impl DocumentSource for [Document] {
    fn posts(&self) -> &[Document] {
        self
    }
}

impl DocumentSource for Vec<Document> {
    fn posts(&self) -> &[Document] {
        self
    }
}

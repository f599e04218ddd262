//! Loading a Jekyll-style site from disk.
//!
//! Posts live under `_posts/` and are named `YYYY-MM-DD-slug.ext`; drafts live
//! under `_drafts/` and are named `slug.ext`. Each file may start with a YAML
//! front matter block delimited by `---` lines.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use lazy_regex::regex_captures;
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::error::BlogstatsError;
use crate::Result;

use super::document::{Document, Site};
use super::filter::{discover_files, FilterConfig};

/// Directory holding published posts, relative to the site root.
pub const POSTS_DIR: &str = "_posts";
/// Directory holding drafts, relative to the site root.
pub const DRAFTS_DIR: &str = "_drafts";

/// Front matter keys that map onto [`Document`] fields.
const KNOWN_KEYS: &[&str] = &[
    "title",
    "date",
    "tags",
    "tag",
    "categories",
    "category",
    "permalink",
    "slug",
    "published",
];

/// Options for loading a site.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// File filter applied to both posts and drafts
    pub file_filter: FilterConfig,
}

impl LoadOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }
}

/// Load every post and draft under a site root.
///
/// Posts whose file name carries no date and documents whose front matter is
/// not valid YAML are skipped with a warning, as are documents marked
/// `published: false`. Both lists come back ordered by date, then path.
pub fn load_site(root: impl AsRef<Path>, options: &LoadOptions) -> Result<Site> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(BlogstatsError::PathNotFound(root.to_path_buf()));
    }

    let mut site = Site::new();

    for path in discover_files(root, root.join(POSTS_DIR), &options.file_filter) {
        if let Some(doc) = read_document(&path, false)? {
            site.posts.push(doc);
        }
    }

    for path in discover_files(root, root.join(DRAFTS_DIR), &options.file_filter) {
        if let Some(doc) = read_document(&path, true)? {
            site.drafts.push(doc);
        }
    }

    // Paths are already sorted, so a stable sort on date keeps path order for ties.
    site.posts.sort_by_key(|d| d.date);
    site.drafts.sort_by_key(|d| d.date);

    info!(
        posts = site.posts.len(),
        drafts = site.drafts.len(),
        root = %root.display(),
        "loaded site"
    );

    Ok(site)
}

/// Read and parse a single document file.
pub fn read_document(path: &Path, draft: bool) -> Result<Option<Document>> {
    let content = fs::read_to_string(path).map_err(|source| BlogstatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let modified = if draft {
        let time = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| BlogstatsError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Some(DateTime::<Local>::from(time).naive_local())
    } else {
        None
    };

    parse_document(path, &content, draft, modified)
}

/// Parse document text.
///
/// `modified` is the fallback date for drafts without a `date` key; posts
/// fall back to the date in their file name instead.
pub fn parse_document(
    path: &Path,
    content: &str,
    draft: bool,
    modified: Option<NaiveDateTime>,
) -> Result<Option<Document>> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_parts = regex_captures!(r"^(\d{4})-(\d{1,2})-(\d{1,2})-(.+)$", &stem);
    let (name_date, name_slug) = match name_parts {
        Some((_, y, m, d, slug)) => {
            let date = match (y.parse(), m.parse(), d.parse()) {
                (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
                _ => None,
            };
            (date.and_then(|d| d.and_hms_opt(0, 0, 0)), slug.to_string())
        }
        None => (None, stem.clone()),
    };

    if !draft && name_date.is_none() {
        warn!(path = %path.display(), "skipping post without a YYYY-MM-DD- file name prefix");
        return Ok(None);
    }

    let (mut front, body) = match split_front_matter(content) {
        Some((yaml, body)) => match parse_front_matter(path, yaml) {
            Ok(front) => (front, body),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "skipping document with invalid front matter"
                );
                return Ok(None);
            }
        },
        None => (IndexMap::new(), content),
    };

    if matches!(front.get("published"), Some(Value::Bool(false))) {
        debug!(path = %path.display(), "skipping unpublished document");
        return Ok(None);
    }

    let date = match front.get("date") {
        Some(value) => {
            let raw = scalar_to_string(value).unwrap_or_default();
            Some(parse_date(&raw).ok_or_else(|| BlogstatsError::InvalidDate {
                path: path.to_path_buf(),
                value: raw,
            })?)
        }
        None => None,
    };
    let date = date
        .or(name_date)
        .or(modified)
        .ok_or_else(|| BlogstatsError::InvalidDate {
            path: path.to_path_buf(),
            value: String::new(),
        })?;

    let title = front.get("title").and_then(scalar_to_string);
    let tags = list_values(&front, "tags", "tag");
    let categories = list_values(&front, "categories", "category");

    let slug = front
        .get("slug")
        .and_then(scalar_to_string)
        .unwrap_or(name_slug);
    let url = match front.get("permalink").and_then(scalar_to_string) {
        Some(permalink) => permalink,
        None => default_url(&categories, date, &slug),
    };

    front.retain(|key, _| !KNOWN_KEYS.contains(&key.as_str()));

    debug!(path = %path.display(), %url, draft, "parsed document");

    Ok(Some(Document {
        title,
        date,
        url,
        body: body.to_string(),
        tags,
        categories,
        draft,
        metadata: front,
    }))
}

/// Split a leading `---` delimited block off the content.
///
/// Returns `(front_matter, body)`, or `None` when the content has no complete
/// front matter block.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != "---" {
        return None;
    }

    let yaml_start = first_end + 1;
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn parse_front_matter(path: &Path, yaml: &str) -> Result<IndexMap<String, Value>> {
    if yaml.trim().is_empty() {
        return Ok(IndexMap::new());
    }

    serde_yaml::from_str(yaml).map_err(|e| BlogstatsError::FrontMatter {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a front matter date.
///
/// Values with a UTC offset keep their local wall-clock time.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M %z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list entry; null entries become empty names rather than vanishing.
fn list_item(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        other => scalar_to_string(other),
    }
}

/// Collect a plural list key (sequence or whitespace separated string) plus
/// its singular form.
fn list_values(front: &IndexMap<String, Value>, plural: &str, singular: &str) -> Vec<String> {
    let mut values = Vec::new();

    match front.get(plural) {
        Some(Value::Sequence(items)) => {
            values.extend(items.iter().filter_map(list_item));
        }
        Some(Value::String(s)) => {
            values.extend(s.split_whitespace().map(str::to_string));
        }
        Some(other) => values.extend(scalar_to_string(other)),
        None => {}
    }

    if let Some(single) = front.get(singular).and_then(scalar_to_string) {
        values.push(single);
    }

    values
}

fn default_url(categories: &[String], date: NaiveDateTime, slug: &str) -> String {
    let mut url = String::new();
    for category in categories {
        let segment = category.trim().to_lowercase().replace(char::is_whitespace, "-");
        if !segment.is_empty() {
            url.push('/');
            url.push_str(&segment);
        }
    }
    url.push_str(&date.format("/%Y/%m/%d/").to_string());
    url.push_str(slug);
    url.push_str(".html");
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn post_path(name: &str) -> PathBuf {
        PathBuf::from("_posts").join(name)
    }

    fn write_post(root: &Path, name: &str, content: &str) {
        let dir = root.join(POSTS_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_split_front_matter() {
        let (yaml, body) = split_front_matter("---\ntitle: Hi\n---\n\nBody text").unwrap();
        assert_eq!(yaml, "title: Hi\n");
        assert_eq!(body, "\nBody text");

        assert!(split_front_matter("No front matter").is_none());
        assert!(split_front_matter("---\ntitle: unterminated\n").is_none());
    }

    #[test]
    fn test_split_front_matter_empty_block() {
        let (yaml, body) = split_front_matter("---\n---\nBody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_post_from_filename() {
        let doc = parse_document(&post_path("2024-01-15-hello-world.md"), "Hello", false, None)
            .unwrap()
            .unwrap();

        assert_eq!(doc.title, None);
        assert_eq!(doc.date.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(doc.url, "/2024/01/15/hello-world.html");
        assert_eq!(doc.body, "Hello");
        assert!(!doc.draft);
    }

    #[test]
    fn test_parse_front_matter_fields() {
        let content = "---\n\
            title: Tagged\n\
            date: 2024-02-20 10:30:00 +0100\n\
            tags:\n  - ruby\n  - rails\n\
            category: code\n\
            layout: post\n\
            ---\n\nContent here";
        let doc = parse_document(&post_path("2024-02-20-tagged.md"), content, false, None)
            .unwrap()
            .unwrap();

        assert_eq!(doc.title.as_deref(), Some("Tagged"));
        assert_eq!(doc.date.hour(), 10);
        assert_eq!(doc.date.minute(), 30);
        assert_eq!(doc.tags, vec!["ruby", "rails"]);
        assert_eq!(doc.categories, vec!["code"]);
        assert_eq!(doc.url, "/code/2024/02/20/tagged.html");
        assert_eq!(doc.body.trim(), "Content here");
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.metadata["layout"], Value::String("post".into()));
    }

    #[test]
    fn test_tags_as_space_separated_string() {
        let content = "---\ntags: ruby rails  jekyll\n---\nx";
        let doc = parse_document(&post_path("2024-01-01-a.md"), content, false, None)
            .unwrap()
            .unwrap();

        assert_eq!(doc.tags, vec!["ruby", "rails", "jekyll"]);
    }

    #[test]
    fn test_null_list_entries_become_empty_names() {
        let content = "---\ntags: [ruby, ~, 7]\ncategories:\n  -\n  - code\n---\nx";
        let doc = parse_document(&post_path("2024-01-01-a.md"), content, false, None)
            .unwrap()
            .unwrap();

        assert_eq!(doc.tags, vec!["ruby", "", "7"]);
        assert_eq!(doc.categories, vec!["", "code"]);
        assert_eq!(doc.url, "/code/2024/01/01/a.html");
    }

    #[test]
    fn test_permalink_overrides_url() {
        let content = "---\npermalink: /about-me/\n---\nx";
        let doc = parse_document(&post_path("2024-01-01-a.md"), content, false, None)
            .unwrap()
            .unwrap();

        assert_eq!(doc.url, "/about-me/");
    }

    #[test]
    fn test_unpublished_is_skipped() {
        let content = "---\npublished: false\n---\nx";
        let doc = parse_document(&post_path("2024-01-01-a.md"), content, false, None).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_post_without_dated_name_is_skipped() {
        let doc = parse_document(&post_path("about.md"), "x", false, None).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_invalid_date_is_error() {
        let content = "---\ndate: someday\n---\nx";
        let result = parse_document(&post_path("2024-01-01-a.md"), content, false, None);

        match result {
            Err(BlogstatsError::InvalidDate { value, .. }) => assert_eq!(value, "someday"),
            other => panic!("Expected InvalidDate error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_front_matter_is_skipped() {
        let content = "---\ntitle: [unclosed\n---\nx";
        let doc = parse_document(&post_path("2024-01-01-a.md"), content, false, None).unwrap();

        assert!(doc.is_none());
    }

    #[test]
    fn test_invalid_front_matter_error_names_file() {
        let result = parse_front_matter(Path::new("_posts/2024-01-01-a.md"), "title: [unclosed\n");

        match result {
            Err(BlogstatsError::FrontMatter { path, .. }) => {
                assert_eq!(path, Path::new("_posts/2024-01-01-a.md"))
            }
            other => panic!("Expected FrontMatter error, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_falls_back_to_modified_time() {
        let modified = parse_date("2024-03-05 08:00:00").unwrap();
        let doc = parse_document(Path::new("_drafts/idea.md"), "Idea", true, Some(modified))
            .unwrap()
            .unwrap();

        assert!(doc.draft);
        assert_eq!(doc.date, modified);
        assert_eq!(doc.url, "/2024/03/05/idea.html");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024-01-15 10:00").is_some());
        assert!(parse_date("2024-01-15 10:00:00").is_some());
        assert!(parse_date("2024-01-15 10:00:00 -0500").is_some());
        assert!(parse_date("2024-01-15T10:00:00Z").is_some());
        assert!(parse_date("January 15th").is_none());

        let with_offset = parse_date("2024-01-15 23:30:00 -0500").unwrap();
        assert_eq!(with_offset.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_load_site() {
        let temp = tempdir().unwrap();
        write_post(temp.path(), "2024-02-20-second.md", "---\ntitle: Second\n---\nTwo");
        write_post(temp.path(), "2023-06-01-first.md", "---\ntitle: First\n---\nOne");

        let drafts = temp.path().join(DRAFTS_DIR);
        fs::create_dir_all(&drafts).unwrap();
        fs::write(drafts.join("wip.md"), "---\ntitle: WIP\n---\nDraft").unwrap();

        let site = load_site(temp.path(), &LoadOptions::new()).unwrap();

        assert_eq!(site.posts.len(), 2);
        assert_eq!(site.posts[0].title.as_deref(), Some("First"));
        assert_eq!(site.posts[1].title.as_deref(), Some("Second"));
        assert_eq!(site.drafts.len(), 1);
        assert!(site.drafts[0].draft);
    }

    #[test]
    fn test_load_site_with_filter() {
        let temp = tempdir().unwrap();
        write_post(temp.path(), "2024-02-20-keep.md", "Keep");
        write_post(temp.path(), "2023-06-01-drop.md", "Drop");

        let filter = FilterConfig::new().exclude("_posts/2023-*").unwrap();
        let site = load_site(temp.path(), &LoadOptions::new().filter(filter)).unwrap();

        assert_eq!(site.posts.len(), 1);
        assert_eq!(site.posts[0].body, "Keep");
    }

    #[test]
    fn test_load_site_keeps_posts_around_broken_front_matter() {
        let temp = tempdir().unwrap();
        write_post(temp.path(), "2024-01-01-good.md", "---\ntitle: Good\n---\nFine");
        write_post(temp.path(), "2024-01-02-bad.md", "---\ntitle: [oops\n---\nBroken");
        write_post(temp.path(), "2024-01-03-later.md", "---\ntitle: Later\n---\nAlso fine");

        let site = load_site(temp.path(), &LoadOptions::new()).unwrap();

        let titles: Vec<_> = site.posts.iter().map(|p| p.display_title()).collect();
        assert_eq!(titles, vec!["Good", "Later"]);
    }

    #[test]
    fn test_load_site_missing_root() {
        let result = load_site("/nonexistent/site", &LoadOptions::new());
        assert!(matches!(result, Err(BlogstatsError::PathNotFound(_))));
    }

    #[test]
    fn test_load_empty_site() {
        let temp = tempdir().unwrap();
        let site = load_site(temp.path(), &LoadOptions::new()).unwrap();

        assert!(site.posts.is_empty());
        assert!(site.drafts.is_empty());
    }
}

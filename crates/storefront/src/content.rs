//! Content management for markdown-based pages and blog posts.
//!
//! This module loads markdown files from the `content/` directory at startup,
//! parses frontmatter metadata, and renders markdown to HTML.
//!
//! ```text
//! content/
//!   pages/about.md
//!   blog/2025-10-20-mix-match-streetwear.md
//! ```

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Metadata for static pages (about, etc.)
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Hero image shown above the page body.
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// Metadata for blog posts
#[derive(Debug, Clone, Deserialize)]
pub struct PostMeta {
    pub title: String,
    /// Short excerpt shown on cards.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Badge such as "Fashion Tips".
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// A rendered blog post with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

/// Content store that holds all loaded content in memory
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
    posts: Arc<Vec<Post>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let pages = Self::load_pages(&content_dir.join("pages"))?;
        let posts = Self::load_posts(&content_dir.join("blog"))?;

        Ok(Self {
            pages: Arc::new(pages),
            posts: Arc::new(posts),
        })
    }

    /// Load all pages from the pages directory
    fn load_pages(dir: &Path) -> Result<HashMap<String, Page>, ContentError> {
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        for path in markdown_files(dir)? {
            match Self::load_page(&path) {
                Ok(page) => {
                    tracing::info!("Loaded page: {}", page.slug);
                    pages.insert(page.slug.clone(), page);
                }
                Err(e) => {
                    tracing::error!("Failed to load page {:?}: {}", path, e);
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a markdown file
    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let (meta, body) = parse_frontmatter::<PageMeta>(&content)?;

        Ok(Page {
            slug,
            meta,
            content_html: render_markdown(&body),
        })
    }

    /// Load all blog posts from the blog directory
    fn load_posts(dir: &Path) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();

        if !dir.exists() {
            tracing::info!("Blog directory does not exist yet: {:?}", dir);
            return Ok(posts);
        }

        for path in markdown_files(dir)? {
            match Self::load_post(&path) {
                Ok(post) => {
                    tracing::info!("Loaded post: {}", post.slug);
                    posts.push(post);
                }
                Err(e) => {
                    tracing::error!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Newest first; slug breaks ties so the order is stable across runs
        posts.sort_by(|a, b| {
            b.meta
                .published_at
                .cmp(&a.meta.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        Ok(posts)
    }

    /// Load a single blog post from a markdown file
    fn load_post(path: &Path) -> Result<Post, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let filename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;

        let (meta, body) = parse_frontmatter::<PostMeta>(&content)?;

        Ok(Post {
            slug: slug_from_filename(filename),
            meta,
            content_html: render_markdown(&body),
            reading_time_minutes: reading_time_minutes(&body),
        })
    }

    /// Get a page by slug
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Get a published blog post by slug (drafts are hidden)
    #[must_use]
    pub fn get_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug && !p.meta.draft)
    }

    /// Get all published blog posts (excludes drafts), newest first
    pub fn get_published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.meta.draft)
    }

    /// Get recent published posts, optionally excluding a specific slug
    #[must_use]
    pub fn get_recent_posts(&self, limit: usize, exclude_slug: Option<&str>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| !p.meta.draft && exclude_slug.is_none_or(|s| p.slug != s))
            .take(limit)
            .collect()
    }
}

/// Markdown files directly inside `dir`, sorted by path.
fn markdown_files(dir: &Path) -> Result<Vec<std::path::PathBuf>, ContentError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;
    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Split YAML frontmatter from the markdown body.
fn parse_frontmatter<T>(content: &str) -> Result<(T, String), ContentError>
where
    T: serde::de::DeserializeOwned,
{
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<T> = matter
        .parse(content)
        .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;
    Ok((meta, parsed.content))
}

/// Extract slug from filename (e.g., "2025-01-15-my-post" -> "my-post").
fn slug_from_filename(filename: &str) -> String {
    let has_date_prefix = filename.len() > 11
        && filename
            .get(..10)
            .is_some_and(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok())
        && filename.as_bytes().get(10) == Some(&b'-');

    if has_date_prefix {
        filename.get(11..).unwrap_or(filename).to_string()
    } else {
        filename.to_string()
    }
}

/// Estimate reading time (average 200 words per minute), at least one minute.
fn reading_time_minutes(body: &str) -> u32 {
    let word_count = body.split_whitespace().count();
    u32::try_from(word_count.div_ceil(200)).unwrap_or(u32::MAX).max(1)
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    // Content is authored in-repo, so raw HTML is allowed
    options.render.r#unsafe = true;

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn temp_content_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "febsin-content-{name}-{}",
            uuid::Uuid::new_v4().simple()
        ));
        let blog = dir.join("blog");
        write(
            &blog,
            "2025-10-10-older.md",
            "---\ntitle: Older\npublished_at: 2025-10-10\ncategory: Sustainability\n---\nHello **world**\n",
        );
        write(
            &blog,
            "2025-10-20-newer.md",
            "---\ntitle: Newer\npublished_at: 2025-10-20\ndescription: Tips\n---\nBody\n",
        );
        write(
            &blog,
            "hidden.md",
            "---\ntitle: Hidden\npublished_at: 2025-11-01\ndraft: true\n---\nSecret\n",
        );
        write(
            &dir.join("pages"),
            "about.md",
            "---\ntitle: About Febsin\n---\n## Cerita Kami\n",
        );
        dir
    }

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(slug_from_filename("2025-10-20-mix-match"), "mix-match");
        assert_eq!(slug_from_filename("mix-match-streetwear"), "mix-match-streetwear");
        assert_eq!(slug_from_filename("2025-10-20"), "2025-10-20");
    }

    #[test]
    fn test_reading_time_minimum_one_minute() {
        assert_eq!(reading_time_minutes("satu dua tiga"), 1);
        assert_eq!(reading_time_minutes(&"kata ".repeat(401)), 3);
    }

    #[test]
    fn test_load_orders_posts_and_hides_drafts() {
        let dir = temp_content_dir("order");
        let store = ContentStore::load(&dir).unwrap();

        let slugs: Vec<&str> = store.get_published_posts().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "older"]);
        assert!(store.get_post("hidden").is_none());

        let older = store.get_post("older").unwrap();
        assert!(older.content_html.contains("<strong>world</strong>"));
        assert_eq!(older.meta.category.as_deref(), Some("Sustainability"));

        let related: Vec<&str> = store
            .get_recent_posts(3, Some("newer"))
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(related, ["older"]);

        let about = store.get_page("about").unwrap();
        assert_eq!(about.meta.title, "About Febsin");
        assert!(about.content_html.contains("Cerita Kami"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_directories_are_empty() {
        let dir = std::env::temp_dir().join("febsin-content-does-not-exist");
        let store = ContentStore::load(&dir).unwrap();
        assert_eq!(store.get_published_posts().count(), 0);
        assert!(store.get_page("about").is_none());
    }
}

//! Shared test utilities for the print-perfect test suite.
//!
//! Provides CMS post builders, fixture setup, and lookup helpers that panic
//! with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let posts = fixture_posts();
//! let sections = crate::faq::sections_from_posts(&posts);
//! let shipping = find_section(&sections, "Shipping & Delivery");
//! assert!(!shipping.entries.is_empty());
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::cms::{ContentSource, JsonFileSource, Post, Rendered};
use crate::faq::FaqSection;

// =========================================================================
// Builders
// =========================================================================

/// A CMS post with the given plain title and rendered content.
pub fn post(id: u64, title: &str, content: &str) -> Post {
    Post {
        id,
        title: Rendered {
            rendered: title.to_string(),
        },
        content: Rendered {
            rendered: content.to_string(),
        },
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Posts from `fixtures/faq-posts.json`, titles decoded.
pub fn fixture_posts() -> Vec<Post> {
    JsonFileSource::new(fixture_path("faq-posts.json"))
        .fetch_posts()
        .unwrap_or_else(|e| panic!("fixture posts failed to load: {e}"))
}

/// Copy the fixture posts into a fresh temp directory and return it.
///
/// Tests get an isolated copy they can mutate or break.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::copy(
        fixture_path("faq-posts.json"),
        tmp.path().join("faq-posts.json"),
    )
    .unwrap();
    tmp
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a FAQ section by title. Panics if not found.
pub fn find_section<'a>(sections: &'a [FaqSection], title: &str) -> &'a FaqSection {
    sections
        .iter()
        .find(|s| s.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
            panic!("section '{title}' not found. Available: {titles:?}")
        })
}

/// Read a generated page relative to the output directory. Panics if missing.
pub fn read_page(output: &Path, rel: &str) -> String {
    let path = output.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("generated page {} unreadable: {e}", path.display()))
}

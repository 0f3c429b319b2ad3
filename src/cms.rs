//! Content fetch from the headless CMS.
//!
//! FAQ content lives in WordPress as ordinary posts in one category. The
//! storefront reads them through the REST API (`/wp-json/wp/v2/posts`),
//! oldest first, and treats the response as a plain list of [`Post`]s.
//!
//! One request, no retry. If the CMS is down the build fails and the
//! previous deploy stays live.
//!
//! [`JsonFileSource`] reads the same JSON from disk, for offline builds and
//! for tests.

use crate::config::FaqConfig;
use crate::html;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS returned HTTP {code} {text} for {url}")]
    Status { code: u16, text: String, url: String },
    #[error("CMS request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rendered field as WordPress returns it: `{"rendered": "<p>…</p>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// A CMS post. Fields the storefront does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: Rendered,
    pub content: Rendered,
}

/// Anything that can produce the FAQ posts.
pub trait ContentSource {
    /// Human-readable origin, for build output.
    fn describe(&self) -> String;

    fn fetch_posts(&self) -> Result<Vec<Post>, CmsError>;
}

/// Titles arrive HTML-escaped (`Shipping &#038; Returns`); decode them to
/// plain text so templates can escape them once, correctly.
fn decode_titles(posts: Vec<Post>) -> Vec<Post> {
    posts
        .into_iter()
        .map(|post| Post {
            title: Rendered {
                rendered: html::text_content(&post.title.rendered),
            },
            ..post
        })
        .collect()
}

/// Fetches posts from the WordPress REST API.
pub struct WordPressSource {
    endpoint: String,
    category: u32,
    agent: ureq::Agent,
}

impl WordPressSource {
    pub fn new(endpoint: impl Into<String>, category: u32, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.into(),
            category,
            agent,
        }
    }

    pub fn from_config(config: &FaqConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.category,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Full request URL, including the fixed query.
    pub fn url(&self) -> String {
        format!(
            "{}?categories={}&orderby=date&order=asc",
            self.endpoint, self.category
        )
    }
}

impl ContentSource for WordPressSource {
    fn describe(&self) -> String {
        self.url()
    }

    fn fetch_posts(&self) -> Result<Vec<Post>, CmsError> {
        let url = self.url();
        let response = self
            .agent
            .get(&self.endpoint)
            .query("categories", &self.category.to_string())
            .query("orderby", "date")
            .query("order", "asc")
            .call();

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(CmsError::Status {
                    code,
                    text: response.status_text().to_string(),
                    url,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(CmsError::Transport {
                    url,
                    message: transport.to_string(),
                });
            }
        };

        let posts: Vec<Post> = response.into_json()?;
        Ok(decode_titles(posts))
    }
}

/// Reads posts from a JSON file shaped like the REST API response.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_posts(&self) -> Result<Vec<Post>, CmsError> {
        let content = fs::read_to_string(&self.path)?;
        let posts: Vec<Post> = serde_json::from_str(&content)?;
        Ok(decode_titles(posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[
        {
            "id": 12,
            "date": "2025-02-01T10:00:00",
            "slug": "ordering",
            "title": {"rendered": "Ordering &#038; Shipping"},
            "content": {"rendered": "<p><strong>Q?</strong> A.</p>", "protected": false}
        }
    ]"#;

    #[test]
    fn json_file_source_reads_and_decodes_titles() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("posts.json");
        fs::write(&path, SAMPLE).unwrap();

        let posts = JsonFileSource::new(&path).fetch_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 12);
        assert_eq!(posts[0].title.rendered, "Ordering & Shipping");
        // Content stays as markup for the FAQ parser
        assert_eq!(posts[0].content.rendered, "<p><strong>Q?</strong> A.</p>");
    }

    #[test]
    fn json_file_source_sees_edits_to_the_file() {
        let tmp = crate::test_helpers::setup_fixtures();
        let path = tmp.path().join("faq-posts.json");
        let source = JsonFileSource::new(&path);
        assert_eq!(source.fetch_posts().unwrap().len(), 3);

        fs::write(&path, "[]").unwrap();
        assert!(source.fetch_posts().unwrap().is_empty());
    }

    #[test]
    fn json_file_source_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = JsonFileSource::new(tmp.path().join("nope.json")).fetch_posts();
        assert!(matches!(result, Err(CmsError::Io(_))));
    }

    #[test]
    fn json_file_source_malformed_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("posts.json");
        fs::write(&path, r#"{"not": "a list"}"#).unwrap();
        let result = JsonFileSource::new(&path).fetch_posts();
        assert!(matches!(result, Err(CmsError::Json(_))));
    }

    #[test]
    fn wordpress_url_has_fixed_query() {
        let source = WordPressSource::new(
            "http://print-perfect.local/wp-json/wp/v2/posts",
            5,
            Duration::from_secs(10),
        );
        assert_eq!(
            source.url(),
            "http://print-perfect.local/wp-json/wp/v2/posts?categories=5&orderby=date&order=asc"
        );
        assert_eq!(source.describe(), source.url());
    }

    #[test]
    fn wordpress_unreachable_host_is_transport_error() {
        // Port 9 on localhost: nothing listens, the connection is refused.
        let source = WordPressSource::new(
            "http://127.0.0.1:9/wp-json/wp/v2/posts",
            5,
            Duration::from_secs(2),
        );
        let result = source.fetch_posts();
        assert!(matches!(result, Err(CmsError::Transport { .. })));
    }

    /// Answer one request on a local port with `status` and `body`.
    ///
    /// Returns the endpoint URL and a receiver for the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let _ = tx.send(request.lines().next().unwrap_or("").to_string());
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        (format!("http://{addr}/wp-json/wp/v2/posts"), rx)
    }

    #[test]
    fn wordpress_reads_posts_and_decodes_titles() {
        let (endpoint, request) = serve_once("200 OK", SAMPLE);
        let source = WordPressSource::new(endpoint, 5, Duration::from_secs(5));

        let posts = source.fetch_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title.rendered, "Ordering & Shipping");
        assert_eq!(
            request.recv().unwrap(),
            "GET /wp-json/wp/v2/posts?categories=5&orderby=date&order=asc HTTP/1.1"
        );
    }

    #[test]
    fn wordpress_error_status_is_fetch_error() {
        let (endpoint, _request) = serve_once("503 Service Unavailable", "{}");
        let source = WordPressSource::new(endpoint, 5, Duration::from_secs(5));

        match source.fetch_posts() {
            Err(CmsError::Status { code, text, url }) => {
                assert_eq!(code, 503);
                assert_eq!(text, "Service Unavailable");
                assert_eq!(url, source.url());
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_message_names_code() {
        let err = CmsError::Status {
            code: 503,
            text: "Service Unavailable".into(),
            url: "http://cms/posts".into(),
        };
        assert_eq!(
            err.to_string(),
            "CMS returned HTTP 503 Service Unavailable for http://cms/posts"
        );
    }
}

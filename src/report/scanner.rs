//! Key scanner: pull image-reference identifiers out of one entry.
//!
//! Lines are matched as raw text, not parsed as JSON, so malformed
//! documents and odd encodings elsewhere on a line cannot abort a run.

use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A double-quoted http(s) URL containing the CMS image host marker,
/// terminated by the next quote on the same line.
static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(https?://[^"]*img-prod-cms[^"]*)""#).expect("image URL pattern is valid")
});

/// Derive the image key from a matched URL: the final path segment with
/// any trailing query string discarded.
///
/// Idempotent: applying it to its own output is a no-op.
pub fn image_key(url: &str) -> &str {
    let tail = url.rsplit('/').next().unwrap_or(url);
    tail.split('?').next().unwrap_or(tail)
}

/// Scan one file line by line and collect its unique image keys,
/// first-seen order preserved.
///
/// The file is streamed, one suspension per line, so large exports never
/// sit in memory whole. Every match on a line contributes a key; bytes
/// that are not valid UTF-8 are converted lossily rather than faulting.
pub async fn scan_keys(path: &Path) -> io::Result<Vec<String>> {
    let file = fs::File::open(path).await?;
    let mut reader = BufReader::new(file);

    let mut keys = Vec::new();
    let mut seen = HashSet::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).await?;
        if n == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        for captures in IMAGE_URL.captures_iter(&text) {
            let key = image_key(&captures[1]);
            if seen.insert(key.to_string()) {
                keys.push(key.to_string());
            }
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_in(line: &str) -> Vec<String> {
        IMAGE_URL
            .captures_iter(line)
            .map(|c| image_key(&c[1]).to_string())
            .collect()
    }

    #[test]
    fn matches_http_and_https() {
        assert_eq!(
            keys_in(r#"{"a": "https://img-prod-cms.example.com/x/pic1.jpg"}"#),
            ["pic1.jpg"]
        );
        assert_eq!(
            keys_in(r#"{"a": "http://cdn.img-prod-cms.net/pic2.png"}"#),
            ["pic2.png"]
        );
    }

    #[test]
    fn query_string_is_stripped() {
        assert_eq!(
            keys_in(r#""https://img-prod-cms.example.com/a/b/pic1.jpg?x=1&y=2""#),
            ["pic1.jpg"]
        );
    }

    #[test]
    fn multiple_urls_on_one_line_all_match() {
        let line = r#"{"a": "https://img-prod-cms.x/one.jpg", "b": "https://img-prod-cms.x/two.jpg"}"#;
        assert_eq!(keys_in(line), ["one.jpg", "two.jpg"]);
    }

    #[test]
    fn unrelated_urls_do_not_match() {
        assert!(keys_in(r#""https://example.com/pic.jpg""#).is_empty());
        assert!(keys_in("img-prod-cms without quotes or protocol").is_empty());
    }

    #[test]
    fn match_stops_at_closing_quote() {
        let line = r#""https://img-prod-cms.x/a.jpg" and then "more""#;
        assert_eq!(keys_in(line), ["a.jpg"]);
    }

    #[test]
    fn image_key_is_idempotent() {
        let derived = image_key("https://img-prod-cms.example.com/a/b/pic1.jpg?x=1");
        assert_eq!(derived, "pic1.jpg");
        assert_eq!(image_key(derived), derived);
    }

    #[tokio::test]
    async fn scan_dedupes_preserving_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(
            &path,
            concat!(
                "{\"a\": \"https://img-prod-cms.x/b.jpg\"}\n",
                "{\"b\": \"https://img-prod-cms.x/a.jpg?v=1\"}\n",
                "{\"c\": \"https://img-prod-cms.x/other/b.jpg?v=2\"}\n",
            ),
        )
        .unwrap();

        let keys = scan_keys(&path).await.unwrap();
        assert_eq!(keys, ["b.jpg", "a.jpg"]);
    }

    #[tokio::test]
    async fn scan_tolerates_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut data = b"\xff\xfe garbage\n".to_vec();
        data.extend_from_slice(b"{\"a\": \"https://img-prod-cms.x/ok.jpg\"}\n");
        std::fs::write(&path, data).unwrap();

        let keys = scan_keys(&path).await.unwrap();
        assert_eq!(keys, ["ok.jpg"]);
    }
}

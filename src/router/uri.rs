//! Content URI parsing
//!
//! Accepted spellings:
//! - bare paths: `/pets/3`, `pets/3`
//! - content URIs: `content://com.example.android.pets/pets/3`
//!
//! Query strings and fragments are not part of the resource identity and are
//! dropped during parsing.

use std::fmt;

const CONTENT_SCHEME: &str = "content://";

/// A parsed resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUri {
    authority: Option<String>,
    segments: Vec<String>,
}

impl ContentUri {
    /// Parse a resource identifier.
    ///
    /// Parsing never fails; a string that does not look like a path simply
    /// yields segments no route will match.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split(&['?', '#'][..]).next().unwrap_or_default();

        let (authority, path) = match raw.strip_prefix(CONTENT_SCHEME) {
            Some(rest) => match rest.find('/') {
                Some(slash) => (Some(rest[..slash].to_string()), &rest[slash..]),
                None => (Some(rest.to_string()), ""),
            },
            None => (None, raw),
        };

        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            authority,
            segments,
        }
    }

    /// Build a content URI from an authority and path segments.
    pub fn new(authority: impl Into<String>, segments: &[&str]) -> Self {
        Self {
            authority: Some(authority.into()),
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The authority, if the URI carried a `content://` prefix.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Non-empty path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The trailing segment parsed as a row id.
    ///
    /// Returns `None` when the URI has no segments or the last segment is not
    /// a non-negative integer.
    pub fn parse_id(&self) -> Option<i64> {
        let last = self.segments.last()?;
        if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        last.parse().ok()
    }

    /// A copy of this URI with `id` appended as a new trailing segment.
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self {
            authority: self.authority.clone(),
            segments,
        }
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(authority) = &self.authority {
            write!(f, "{}{}", CONTENT_SCHEME, authority)?;
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        if self.segments.is_empty() && self.authority.is_none() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

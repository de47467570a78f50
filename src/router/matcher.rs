//! Pattern table for resource identifiers
//!
//! Patterns form a segment tree. Lookup walks the tree one URI segment at a
//! time and, at every level, tries the literal child first, then the numeric
//! wildcard, then the text wildcard. The first complete path wins, so the
//! most specific registered pattern is always preferred.

use super::uri::ContentUri;

const NUMBER_WILDCARD: &str = "#";
const TEXT_WILDCARD: &str = "*";

#[derive(Debug)]
struct Node<C> {
    code: Option<C>,
    literals: Vec<(String, Node<C>)>,
    number: Option<Box<Node<C>>>,
    text: Option<Box<Node<C>>>,
}

impl<C> Node<C> {
    fn new() -> Self {
        Self {
            code: None,
            literals: Vec::new(),
            number: None,
            text: None,
        }
    }

    fn child_mut(&mut self, segment: &str) -> &mut Node<C> {
        match segment {
            NUMBER_WILDCARD => self.number.get_or_insert_with(|| Box::new(Node::new())),
            TEXT_WILDCARD => self.text.get_or_insert_with(|| Box::new(Node::new())),
            literal => {
                let pos = match self.literals.iter().position(|(s, _)| s == literal) {
                    Some(pos) => pos,
                    None => {
                        self.literals.push((literal.to_string(), Node::new()));
                        self.literals.len() - 1
                    }
                };
                &mut self.literals[pos].1
            }
        }
    }
}

impl<C: Copy> Node<C> {
    fn lookup(&self, segments: &[String]) -> Option<C> {
        let (head, rest) = match segments.split_first() {
            Some(split) => split,
            None => return self.code,
        };

        if let Some((_, child)) = self.literals.iter().find(|(s, _)| s == head) {
            if let Some(code) = child.lookup(rest) {
                return Some(code);
            }
        }

        if let Some(child) = &self.number {
            if is_numeric(head) {
                if let Some(code) = child.lookup(rest) {
                    return Some(code);
                }
            }
        }

        self.text.as_ref().and_then(|child| child.lookup(rest))
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Maps resource identifiers to route codes.
///
/// A lookup that matches nothing returns `None`, which plays the role of the
/// `NO_MATCH` sentinel.
#[derive(Debug)]
pub struct UriMatcher<C> {
    authority: Option<String>,
    root: Node<C>,
}

impl<C: Copy> UriMatcher<C> {
    /// Create a matcher that accepts bare paths and content URIs of any
    /// authority.
    pub fn new() -> Self {
        Self {
            authority: None,
            root: Node::new(),
        }
    }

    /// Create a matcher that rejects content URIs carrying a different
    /// authority. Bare paths are still accepted.
    pub fn with_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: Some(authority.into()),
            root: Node::new(),
        }
    }

    /// Register `pattern` under `code`.
    ///
    /// Registering the same pattern twice replaces the earlier code.
    pub fn register(&mut self, pattern: &str, code: C) {
        let node = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(&mut self.root, |node, segment| node.child_mut(segment));
        node.code = Some(code);
    }

    /// Match a parsed URI against the registered patterns.
    pub fn match_uri(&self, uri: &ContentUri) -> Option<C> {
        if let (Some(expected), Some(actual)) = (self.authority.as_deref(), uri.authority()) {
            if expected != actual {
                return None;
            }
        }
        self.root.lookup(uri.segments())
    }

    /// Parse `raw` and match it.
    pub fn match_path(&self, raw: &str) -> Option<C> {
        self.match_uri(&ContentUri::parse(raw))
    }
}

impl<C: Copy> Default for UriMatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

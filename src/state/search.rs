//! Search state machine and fuzzy search index.
//!
//! SearchState is a sum type representing the three possible search states:
//! - Inactive: No search active, every card is a result
//! - Typing: User is editing the query; results follow each keystroke
//! - Active: Query committed, keys go back to card navigation
//!
//! The index scores each post by approximate substring matching: the
//! smallest edit distance between the query and any substring of the
//! document, normalised by the query length.

use crate::model::Post;

/// Highest normalised edit distance that still counts as a match.
pub const MATCH_THRESHOLD: f64 = 0.35;

/// Longest query scored with the fuzzy matcher. Longer queries fall back to
/// plain substring matching.
pub const MAX_FUZZY_PATTERN_CHARS: usize = 32;

// ===== SearchState =====

/// Search state machine.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No active search.
    #[default]
    Inactive,
    /// User is typing query. `cursor` is a char index into `query`.
    Typing {
        /// Query text so far.
        query: String,
        /// Char index into `query`.
        cursor: usize,
    },
    /// Query committed; the gallery stays filtered.
    Active {
        /// Committed query.
        query: SearchQuery,
    },
}

impl SearchState {
    /// The query currently filtering the gallery, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Inactive => None,
            SearchState::Typing { query, .. } => Some(query.as_str()),
            SearchState::Active { query } => Some(query.as_str()),
        }
    }

    /// Whether the search box has keyboard focus.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchState::Typing { .. })
    }
}

// ===== SearchQuery =====

/// Validated search query. Never empty.
/// Smart constructor enforces non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: validates query is non-empty.
    /// Returns None if query is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ===== SearchIndex =====

/// A post as seen by the index.
#[derive(Debug, Clone)]
struct Document {
    /// `"{title} {type} {plain body}"`, lowercased.
    text: Vec<char>,
    title: String,
    body: String,
    post_type: &'static str,
}

/// Fuzzy index over a fixed collection of posts.
///
/// Built once at startup; posts are identified by their position in the
/// collection passed to [`SearchIndex::new`].
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    documents: Vec<Document>,
}

impl SearchIndex {
    /// Index `posts` for searching.
    pub fn new(posts: &[Post]) -> Self {
        let documents = posts
            .iter()
            .map(|post| {
                let title = post.title().to_lowercase();
                let body = post.plain_text().to_lowercase();
                let post_type = post.post_type().as_str();
                let text = format!("{title} {post_type} {body}").chars().collect();
                Document {
                    text,
                    title,
                    body,
                    post_type,
                }
            })
            .collect();
        Self { documents }
    }

    /// Number of indexed posts.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no post is indexed.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Indices of matching posts, best match first.
    ///
    /// An empty or whitespace-only query returns every index in collection
    /// order. Equal scores keep collection order.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return (0..self.documents.len()).collect();
        }

        let pattern: Vec<char> = query.chars().collect();
        if pattern.len() > MAX_FUZZY_PATTERN_CHARS {
            return self
                .documents
                .iter()
                .enumerate()
                .filter(|(_, doc)| {
                    doc.title.contains(&query)
                        || doc.body.contains(&query)
                        || doc.post_type.contains(&query)
                })
                .map(|(i, _)| i)
                .collect();
        }

        let mut scored: Vec<(usize, f64)> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| {
                fuzzy_score(&pattern, &doc.text)
                    .filter(|score| *score <= MATCH_THRESHOLD)
                    .map(|score| (i, score))
            })
            .collect();
        // sort_by is stable, so ties keep collection order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

/// Normalised approximate-substring distance of `pattern` in `text`.
///
/// Returns the minimum edit distance between `pattern` and any substring of
/// `text`, divided by the pattern length. `0.0` is an exact substring match.
/// Returns `None` for an empty pattern.
pub fn fuzzy_score(pattern: &[char], text: &[char]) -> Option<f64> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }

    // Column of the edit-distance matrix for the current text position.
    // Row 0 is always zero: a match may start anywhere in the text.
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let above = column[i];
            let cost = usize::from(pattern[i - 1] != tc);
            column[i] = (diagonal + cost).min(above + 1).min(column[i - 1] + 1);
            diagonal = above;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    Some(best as f64 / m as f64)
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

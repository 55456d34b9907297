//! Keyword sets
//!
//! An ordered sequence of raw user-supplied search terms. Keywords are
//! lower-cased when patterns are emitted and substring-matched; SQL wildcard
//! characters (`%`, `_`) inside a keyword keep their wildcard meaning.

/// An ordered set of raw search keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Create a keyword set, preserving the given order
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the set holds no keywords
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of keywords
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Iterate over the raw keywords in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    // LIKE patterns in keyword order: `%<lowercased keyword>%`.
    pub(crate) fn patterns(&self) -> impl Iterator<Item = String> + '_ {
        self.keywords
            .iter()
            .map(|keyword| format!("%{}%", keyword.to_lowercase()))
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

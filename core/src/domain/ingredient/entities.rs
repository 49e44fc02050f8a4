use serde::{Deserialize, Serialize};

/// Ordered list of lowercase, trimmed ingredient terms considered unhealthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    /// Parse a newline-delimited term file. Blank lines are skipped since an
    /// empty term would match any text.
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TermList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let terms = iter
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        Self { terms }
    }
}

/// Terms of a [`TermList`] found in an ingredient text, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult(Vec<String>);

impl MatchResult {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for MatchResult {
    fn from(terms: Vec<String>) -> Self {
        Self(terms)
    }
}

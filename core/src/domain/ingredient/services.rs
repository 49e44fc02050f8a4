use crate::domain::ingredient::entities::{MatchResult, TermList};

/// Terms from `terms` that occur anywhere in `text`, ignoring case.
///
/// Plain substring containment: "oil" matches "boiler". Output order and
/// duplicates follow the term list.
pub fn match_terms(text: &str, terms: &TermList) -> MatchResult {
    let haystack = text.to_lowercase();

    terms
        .terms()
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}

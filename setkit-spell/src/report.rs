//! Per-word results printed by the checker.

use std::fmt;

use setkit::set::Set;
use setkit::suggest::SuggestionEngine;

/// What the checker found out about one query word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The word is in the dictionary.
    Known,
    /// The word is unknown; these words are one edit away.
    Suggestions(Vec<String>),
}

/// A query word, upper-cased, and its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub word: String,
    pub outcome: Outcome,
}

/// Checks `word` against the engine's dictionary.
pub fn check<S: Set<String> + ?Sized>(engine: &SuggestionEngine<'_, S>, word: &str) -> Report {
    let word = word.trim().to_uppercase();
    let outcome = if engine.word_exists(&word) {
        Outcome::Known
    } else {
        Outcome::Suggestions(engine.find_suggestions(&word))
    };
    Report { word, outcome }
}

impl fmt::Display for Report {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = &self.word;
        match &self.outcome {
            Outcome::Known => write!(formatter, "{word}: ok"),
            Outcome::Suggestions(suggestions) if suggestions.is_empty() => {
                write!(formatter, "{word}: no suggestions")
            }
            Outcome::Suggestions(suggestions) => {
                let joined = suggestions.join(", ");
                write!(formatter, "{word}: suggestions: {joined}")
            }
        }
    }
}

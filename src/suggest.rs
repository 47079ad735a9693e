//! Spelling suggestions over any [`Set`] of words.
//!
//! [`SuggestionEngine`] borrows a dictionary and proposes every word that is
//! a single edit away from a query. Five kinds of edit are tried, in this
//! order:
//!
//! 1. swapping two adjacent characters
//! 2. inserting a letter `A`..=`Z` at any position
//! 3. deleting one character
//! 4. replacing one character with a different letter `A`..=`Z`
//! 5. splitting the word in two with a space, when both halves are words
//!
//! Only candidates found in the dictionary survive. The engine never changes
//! letter case, so the dictionary and the queries are expected to agree on it
//! (upper case, given the alphabet).
//!
//! # Examples
//!
//! ```rust
//! use setkit::set::{BalancedTreeSet, Set};
//! use setkit::suggest::SuggestionEngine;
//!
//! let mut words = BalancedTreeSet::new();
//! for word in ["CAT", "CAR", "CARS", "ACT"] {
//!     words.add(word.to_string());
//! }
//!
//! let engine = SuggestionEngine::new(&words);
//! assert!(engine.word_exists("CAT"));
//! assert_eq!(engine.find_suggestions("CTA"), vec!["CAT"]);
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use crate::set::Set;

/// Letters tried by insertion and substitution.
pub const ALPHABET: RangeInclusive<char> = 'A'..='Z';

/// Proposes dictionary words one edit away from a query.
///
/// The engine borrows its dictionary; it works with any container that
/// implements `Set<String>`, including trait objects.
///
/// # Complexity
///
/// Each generator builds O(alphabet * length) candidates and asks the
/// dictionary about each one.
pub struct SuggestionEngine<'a, S: ?Sized> {
    words: &'a S,
}

impl<'a, S: Set<String> + ?Sized> SuggestionEngine<'a, S> {
    /// Creates an engine over `words`.
    #[must_use]
    pub const fn new(words: &'a S) -> Self {
        Self { words }
    }

    /// Returns `true` if `word` is in the dictionary.
    #[must_use]
    pub fn word_exists(&self, word: &str) -> bool {
        self.words.contains(&word.to_owned())
    }

    /// Returns every dictionary word one edit away from `word`.
    ///
    /// Results appear in generator order (transpositions, insertions,
    /// deletions, substitutions, splits) with later duplicates removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::{ChainedHashSet, Set};
    /// use setkit::suggest::SuggestionEngine;
    ///
    /// let mut words = ChainedHashSet::with_default_hasher();
    /// for word in ["CAT", "CAR", "CARS"] {
    ///     words.add(word.to_string());
    /// }
    ///
    /// let engine = SuggestionEngine::new(&words);
    /// assert_eq!(engine.find_suggestions("CAR"), vec!["CARS", "CAT"]);
    /// ```
    #[must_use]
    pub fn find_suggestions(&self, word: &str) -> Vec<String> {
        let mut suggestions: Vec<String> = Vec::new();
        let candidates = self
            .transpositions(word)
            .into_iter()
            .chain(self.insertions(word))
            .chain(self.deletions(word))
            .chain(self.substitutions(word))
            .chain(self.splits(word));
        for candidate in candidates {
            if !suggestions.contains(&candidate) {
                suggestions.push(candidate);
            }
        }
        suggestions
    }

    /// Words formed by swapping two adjacent, distinct characters.
    #[must_use]
    pub fn transpositions(&self, word: &str) -> Vec<String> {
        let letters: Vec<char> = word.chars().collect();
        self.existing((1..letters.len()).filter_map(|index| {
            if letters[index - 1] == letters[index] {
                return None;
            }
            let mut swapped = letters.clone();
            swapped.swap(index - 1, index);
            Some(swapped.into_iter().collect())
        }))
    }

    /// Words formed by inserting one letter at any position, ends included.
    #[must_use]
    pub fn insertions(&self, word: &str) -> Vec<String> {
        let letters: Vec<char> = word.chars().collect();
        self.existing((0..=letters.len()).flat_map(|index| {
            let letters = &letters;
            ALPHABET.map(move |letter| {
                let mut candidate: String = letters[..index].iter().collect();
                candidate.push(letter);
                candidate.extend(&letters[index..]);
                candidate
            })
        }))
    }

    /// Words formed by deleting one character.
    #[must_use]
    pub fn deletions(&self, word: &str) -> Vec<String> {
        let letters: Vec<char> = word.chars().collect();
        self.existing((0..letters.len()).map(|index| {
            letters
                .iter()
                .enumerate()
                .filter_map(|(position, letter)| (position != index).then_some(*letter))
                .collect()
        }))
    }

    /// Words formed by replacing one character with a different letter.
    #[must_use]
    pub fn substitutions(&self, word: &str) -> Vec<String> {
        let letters: Vec<char> = word.chars().collect();
        self.existing((0..letters.len()).flat_map(|index| {
            let letters = &letters;
            ALPHABET
                .filter(move |letter| *letter != letters[index])
                .map(move |letter| {
                    let mut replaced = letters.clone();
                    replaced[index] = letter;
                    replaced.into_iter().collect()
                })
        }))
    }

    /// Pairs `"LEFT RIGHT"` where both non-empty halves of `word` are words.
    #[must_use]
    pub fn splits(&self, word: &str) -> Vec<String> {
        word.char_indices()
            .skip(1)
            .map(|(offset, _)| word.split_at(offset))
            .filter(|(left, right)| self.word_exists(left) && self.word_exists(right))
            .map(|(left, right)| format!("{left} {right}"))
            .collect()
    }

    fn existing<I: IntoIterator<Item = String>>(&self, candidates: I) -> Vec<String> {
        candidates
            .into_iter()
            .filter(|candidate| self.words.contains(candidate))
            .collect()
    }
}

impl<S: ?Sized> Clone for SuggestionEngine<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SuggestionEngine<'_, S> {}

impl<S: ?Sized> fmt::Debug for SuggestionEngine<'_, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SuggestionEngine").finish_non_exhaustive()
    }
}

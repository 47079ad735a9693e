//! Dictionary loading.

use std::io::{self, BufRead};

use setkit::set::Set;

/// Counts gathered while loading a dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Non-blank lines handed to the set.
    pub entries: usize,
}

/// Reads one word per line from `reader` into `words`.
///
/// Lines are trimmed and upper-cased; blank lines are skipped.
pub fn load<R: BufRead, S: Set<String> + ?Sized>(
    reader: R,
    words: &mut S,
) -> io::Result<LoadStats> {
    let mut stats = LoadStats::default();
    for line in reader.lines() {
        stats.lines += 1;
        if let Some(word) = normalize(&line?) {
            stats.entries += 1;
            words.add(word);
        }
    }
    Ok(stats)
}

/// Canonical dictionary form of `line`, or `None` if it holds no word.
pub fn normalize(line: &str) -> Option<String> {
    let word = line.trim();
    (!word.is_empty()).then(|| word.to_uppercase())
}

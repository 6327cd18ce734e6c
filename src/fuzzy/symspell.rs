// File: src/fuzzy/symspell.rs
use std::collections::{HashMap, HashSet};

/// Fuzzy lookup over a fixed vocabulary based on the Symmetric Delete
/// (SymSpell) algorithm. Delete variants of every word are precomputed, so a
/// lookup only costs the deletes of the query, independent of vocabulary size.
#[derive(Debug, Clone)]
pub struct SymSpell {
    /// Maps a delete variant (e.g., "geta colony") to the indices of the
    /// vocabulary words it was derived from.
    deletes: HashMap<String, HashSet<usize>>,
    words: Vec<String>,
    /// Char length of the longest word in the vocabulary.
    longest: usize,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            words: Vec::new(),
            longest: 0,
            max_edit_distance,
        }
    }

    /// Adds a word by generating all its delete variants up to the configured
    /// edit distance. Amortized O(k^2) in the word length.
    pub fn add_word(&mut self, word: &str) {
        let id = self.words.len();
        self.longest = self.longest.max(word.chars().count());
        self.words.push(word.to_string());
        for edit in self.generate_edits(word) {
            self.deletes.entry(edit).or_default().insert(id);
        }
    }

    /// Returns up to `count` vocabulary words within the edit distance of
    /// `input`, closest first, ties broken alphabetically.
    pub fn suggest(&self, input: &str, count: usize) -> Vec<String> {
        // No word can be within reach; skip the O(n^3) delete expansion.
        if input.chars().count() > self.longest + self.max_edit_distance {
            return Vec::new();
        }

        let mut candidates = HashSet::new();
        for edit in self.generate_edits(input) {
            if let Some(ids) = self.deletes.get(&edit) {
                candidates.extend(ids.iter().copied());
            }
        }

        // Shared deletes over-approximate; confirm with the real distance.
        let mut ranked: Vec<(usize, &str)> = candidates
            .into_iter()
            .map(|id| self.words[id].as_str())
            .map(|word| (edit_distance(input, word), word))
            .filter(|&(dist, _)| dist <= self.max_edit_distance)
            .collect();
        ranked.sort();
        ranked
            .into_iter()
            .take(count)
            .map(|(_, word)| word.to_string())
            .collect()
    }

    /// All unique variants within `max_edit_distance` deletions, including
    /// the word itself.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = edits.clone();

        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in current_edits {
                let chars: Vec<char> = edit.chars().collect();
                for i in 0..chars.len() {
                    let deleted_variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, c)| c)
                        .collect();
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }

        edits
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

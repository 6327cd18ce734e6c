// File: src/core/encoder.rs
use crate::error::{ArtifactError, InputError};
use crate::fuzzy::symspell::SymSpell;
use std::collections::HashMap;

const MAX_SUGGESTION_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 3;

/// Trims and lowercases a locality name the way the map keys were built.
pub fn normalize_locality(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fixed locality name -> numeric code mapping built at training time.
/// Read-only once constructed.
#[derive(Debug, Clone)]
pub struct LocalityEncoder {
    codes: HashMap<String, f64>,
    spell: SymSpell,
}

impl LocalityEncoder {
    /// Builds the encoder from a loaded map. Keys must already be normalized
    /// and codes finite; anything else means the artifact is broken.
    pub fn from_map(codes: HashMap<String, f64>) -> Result<Self, ArtifactError> {
        if codes.is_empty() {
            return Err(ArtifactError::invalid("locality map", "map is empty"));
        }

        let mut spell = SymSpell::new(MAX_SUGGESTION_DISTANCE);
        let mut names: Vec<&String> = codes.keys().collect();
        names.sort();
        for (name, code) in names.into_iter().map(|n| (n, codes[n])) {
            if *name != normalize_locality(name) || name.is_empty() {
                return Err(ArtifactError::invalid(
                    "locality map",
                    format!("key '{name}' is not a normalized locality name"),
                ));
            }
            if !code.is_finite() {
                return Err(ArtifactError::invalid(
                    "locality map",
                    format!("code for '{name}' is not finite"),
                ));
            }
            spell.add_word(name);
        }

        Ok(Self { codes, spell })
    }

    /// Looks up the code for a user-entered locality name.
    pub fn encode(&self, locality_name: &str) -> Result<f64, InputError> {
        let name = normalize_locality(locality_name);
        match self.codes.get(&name) {
            Some(&code) => Ok(code),
            None => Err(InputError::UnknownLocality {
                suggestions: self.spell.suggest(&name, MAX_SUGGESTIONS),
                name,
            }),
        }
    }

    pub fn contains(&self, locality_name: &str) -> bool {
        self.codes.contains_key(&normalize_locality(locality_name))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The raw mapping, e.g. for writing the artifact back to disk.
    pub fn codes(&self) -> &HashMap<String, f64> {
        &self.codes
    }
}

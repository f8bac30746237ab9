//! `§key§` template substitution with pronoun-aware option tables.
//!
//! A sentence like `"§subjective§ tugs at §dependent§ §restraint§"` is
//! resolved against an option table: each placeholder's candidate pool is
//! the acting player's gender-bucket options followed by the neutral ones,
//! one candidate is chosen uniformly at random, and every occurrence of the
//! token is replaced. Substitution values may themselves contain
//! placeholders, so resolution repeats until the string settles.

use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::player::{Gender, Player, PronounForm};

/// Placeholder delimiter. Keys are letters and hyphens only.
pub const DELIMITER: char = '§';

/// Passes before resolution is declared cyclic. Legitimate tables settle
/// in a handful of passes; anything still unresolved at this depth is
/// re-introducing its own keys.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Byte budget for the working string. A substitution that duplicates its
/// own key grows the string geometrically and would exhaust memory long
/// before the pass limit trips; the budget catches it first.
pub const MAX_WORKING_BYTES: usize = 64 * 1024;

/// Stand-in for the delimiter while a missing-key marker sits in the
/// working string: the marker must survive to the output verbatim without
/// the scanner picking it up again. The option table stores markers with
/// real delimiters.
const MARKER_GUARD: char = '\u{F8FF}';

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("placeholders did not settle after {passes} passes; unresolved: {remaining}")]
    Cycle { passes: usize, remaining: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Candidate substitutions for one placeholder key, split by gender bucket.
/// The pool offered to a player is their bucket's list followed by neutral.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OptionSet {
    #[serde(default)]
    pub male: Vec<String>,
    #[serde(default)]
    pub female: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

impl OptionSet {
    /// An option set with neutral candidates only.
    pub fn neutral<S: Into<String>>(options: impl IntoIterator<Item = S>) -> OptionSet {
        OptionSet {
            neutral: options.into_iter().map(Into::into).collect(),
            ..OptionSet::default()
        }
    }
}

/// The substitution engine. Holds the option table (mutable: unknown keys
/// self-heal into diagnostic entries) and the recursion guard.
///
/// The five pronoun-form keys (`§subjective§`, `§objective§`,
/// `§dependent§`, `§independent§`, `§reflexive§`) are built in and resolve
/// from the acting player's pronoun set unless a table entry overrides them.
#[derive(Debug, Clone)]
pub struct SentenceBuilder {
    options: FxHashMap<String, OptionSet>,
    max_passes: usize,
}

impl Default for SentenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceBuilder {
    pub fn new() -> SentenceBuilder {
        SentenceBuilder {
            options: FxHashMap::default(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Override the pass limit (cycle guard).
    pub fn with_max_passes(mut self, max_passes: usize) -> SentenceBuilder {
        self.max_passes = max_passes;
        self
    }

    /// Register or replace the option set for a bare key (no delimiters).
    pub fn insert(&mut self, key: impl Into<String>, options: OptionSet) {
        self.options.insert(key.into(), options);
    }

    pub fn get(&self, key: &str) -> Option<&OptionSet> {
        self.options.get(key)
    }

    /// Load an option table from a RON file: a map from bare key to
    /// `OptionSet`. Entries replace any already registered under the
    /// same key.
    pub fn load_from_ron(&mut self, path: &Path) -> Result<(), TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        self.merge(Self::parse_ron(&contents)?);
        Ok(())
    }

    /// Parse an option table from a RON string.
    pub fn parse_ron(input: &str) -> Result<SentenceBuilder, TemplateError> {
        let options: FxHashMap<String, OptionSet> = ron::from_str(input)?;
        Ok(SentenceBuilder {
            options,
            max_passes: DEFAULT_MAX_PASSES,
        })
    }

    /// Merge another table into this one; `other` wins on key collisions.
    pub fn merge(&mut self, other: SentenceBuilder) {
        for (key, options) in other.options {
            self.options.insert(key, options);
        }
    }

    /// Resolve every placeholder in `sentence` for the given player.
    ///
    /// Randomness is caller-supplied so callers can seed it; resolution is
    /// deterministic for a given table, player, and rng state. A table
    /// whose substitutions keep re-introducing placeholders fails with
    /// `TemplateError::Cycle` instead of looping forever.
    pub fn prompt<R: Rng>(
        &mut self,
        sentence: &str,
        player: &Player,
        rng: &mut R,
    ) -> Result<String, TemplateError> {
        let mut sentence = sentence.to_string();
        for pass in 0..self.max_passes {
            let tokens = scan_placeholders(&sentence);
            if tokens.is_empty() {
                return Ok(sentence.replace(MARKER_GUARD, &DELIMITER.to_string()));
            }
            for token in tokens {
                let key = &token[DELIMITER.len_utf8()..token.len() - DELIMITER.len_utf8()];
                let choice = self.resolve_key(key, player, rng);
                sentence = sentence.replace(&token, &choice);
                if sentence.len() > MAX_WORKING_BYTES {
                    return Err(TemplateError::Cycle {
                        passes: pass + 1,
                        remaining: scan_placeholders(&sentence).join(", "),
                    });
                }
            }
        }
        Err(TemplateError::Cycle {
            passes: self.max_passes,
            remaining: scan_placeholders(&sentence).join(", "),
        })
    }

    /// Pick a substitution for one bare key.
    fn resolve_key<R: Rng>(&mut self, key: &str, player: &Player, rng: &mut R) -> String {
        let marker = missing_marker(key);
        if let Some(set) = self.options.get(key) {
            let bucket: &[String] = match player.pronouns.gender() {
                Some(Gender::Male) => &set.male,
                Some(Gender::Female) => &set.female,
                None => &[],
            };
            let pool: Vec<&String> = bucket.iter().chain(set.neutral.iter()).collect();
            if pool.is_empty() {
                log::debug!("template key {:?} has no options for {:?}", key, player.pronouns);
                return guard_delimiters(&marker);
            }
            let choice = pool[rng.gen_range(0..pool.len())].clone();
            // A self-healed entry is its own token's marker; guard it so
            // the scanner does not pick it up again.
            if choice == marker {
                return guard_delimiters(&choice);
            }
            return choice;
        }

        if let Some(form) = PronounForm::from_key(key) {
            return player.pronouns.form(form).to_string();
        }

        // Unknown key: self-heal with a visible diagnostic entry so the
        // same key stays stable for the lifetime of this builder.
        log::warn!("template key {:?} is not in the option table", key);
        self.options
            .insert(key.to_string(), OptionSet::neutral([marker.clone()]));
        guard_delimiters(&marker)
    }
}

/// Diagnostic substitution for a key with no usable options, stored and
/// shown with its delimiters intact.
fn missing_marker(key: &str) -> String {
    format!("(key-{DELIMITER}{key}{DELIMITER}-missing)")
}

/// Swap a marker's delimiters for the guard char before it enters the
/// working string, keeping it out of the scanner's sight.
fn guard_delimiters(marker: &str) -> String {
    marker.replace(DELIMITER, &MARKER_GUARD.to_string())
}

/// Find every distinct `§key§` token in order of first appearance.
/// Keys are runs of ASCII letters and hyphens, possibly empty.
fn scan_placeholders(sentence: &str) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    let len = chars.len();
    let mut seen = FxHashSet::default();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        if chars[i] != DELIMITER {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < len && (chars[j].is_ascii_alphabetic() || chars[j] == '-') {
            j += 1;
        }
        if j < len && chars[j] == DELIMITER {
            let token: String = chars[i..=j].iter().collect();
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    tokens
}

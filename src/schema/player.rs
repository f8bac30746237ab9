//! Player records and the fixed pronoun table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Newtype wrapper for a player's member number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberNumber(pub u32);

impl std::fmt::Display for MemberNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum PronounError {
    #[error("unknown pronoun set: {0:?}")]
    UnknownPronounSet(String),
}

/// Pronoun set for a player, used by the template engine to resolve
/// `§subjective§` and the other pronoun placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pronouns {
    /// he/him/his/his/himself
    HeHim,
    /// she/her/her/hers/herself
    SheHer,
    /// they/them/their/theirs/themself
    TheyThem,
    /// it/it/its/its/itself
    ItIts,
}

impl Default for Pronouns {
    fn default() -> Self {
        Self::TheyThem
    }
}

/// The five grammatical forms every pronoun set defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PronounForm {
    Subjective,
    Objective,
    Dependent,
    Independent,
    Reflexive,
}

impl PronounForm {
    pub const ALL: [PronounForm; 5] = [
        PronounForm::Subjective,
        PronounForm::Objective,
        PronounForm::Dependent,
        PronounForm::Independent,
        PronounForm::Reflexive,
    ];

    /// The placeholder key this form answers to: "subjective", "objective", ...
    pub fn key(&self) -> &'static str {
        match self {
            Self::Subjective => "subjective",
            Self::Objective => "objective",
            Self::Dependent => "dependent",
            Self::Independent => "independent",
            Self::Reflexive => "reflexive",
        }
    }

    /// Parse a placeholder key back into a form.
    pub fn from_key(key: &str) -> Option<PronounForm> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

/// Gender bucket used to pick gender-specific template options.
/// Only two sets map to a bucket; the rest use neutral options alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Pronouns {
    /// Parse a host-supplied pronoun-set identifier ("HeHim", "SheHer", ...).
    ///
    /// Host data is stringly typed, so an unrecognized identifier is a real
    /// possibility and surfaces as an explicit error rather than a panic.
    pub fn from_identifier(identifier: &str) -> Result<Pronouns, PronounError> {
        match identifier {
            "HeHim" => Ok(Self::HeHim),
            "SheHer" => Ok(Self::SheHer),
            "TheyThem" => Ok(Self::TheyThem),
            "ItIt" | "ItIts" => Ok(Self::ItIts),
            other => Err(PronounError::UnknownPronounSet(other.to_string())),
        }
    }

    /// The identifier the host uses for this set.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::HeHim => "HeHim",
            Self::SheHer => "SheHer",
            Self::TheyThem => "TheyThem",
            Self::ItIts => "ItIts",
        }
    }

    /// Look up one grammatical form in the fixed table.
    pub fn form(&self, form: PronounForm) -> &'static str {
        match (self, form) {
            (Self::HeHim, PronounForm::Subjective) => "he",
            (Self::HeHim, PronounForm::Objective) => "him",
            (Self::HeHim, PronounForm::Dependent) => "his",
            (Self::HeHim, PronounForm::Independent) => "his",
            (Self::HeHim, PronounForm::Reflexive) => "himself",
            (Self::SheHer, PronounForm::Subjective) => "she",
            (Self::SheHer, PronounForm::Objective) => "her",
            (Self::SheHer, PronounForm::Dependent) => "her",
            (Self::SheHer, PronounForm::Independent) => "hers",
            (Self::SheHer, PronounForm::Reflexive) => "herself",
            (Self::TheyThem, PronounForm::Subjective) => "they",
            (Self::TheyThem, PronounForm::Objective) => "them",
            (Self::TheyThem, PronounForm::Dependent) => "their",
            (Self::TheyThem, PronounForm::Independent) => "theirs",
            (Self::TheyThem, PronounForm::Reflexive) => "themself",
            (Self::ItIts, PronounForm::Subjective) => "it",
            (Self::ItIts, PronounForm::Objective) => "it",
            (Self::ItIts, PronounForm::Dependent) => "its",
            (Self::ItIts, PronounForm::Independent) => "its",
            (Self::ItIts, PronounForm::Reflexive) => "itself",
        }
    }

    /// Gender bucket for gendered template options. `HeHim` and `SheHer`
    /// map to a bucket; `TheyThem` and `ItIts` fall through to neutral.
    pub fn gender(&self) -> Option<Gender> {
        match self {
            Self::HeHim => Some(Gender::Male),
            Self::SheHer => Some(Gender::Female),
            Self::TheyThem | Self::ItIts => None,
        }
    }
}

/// A participant in the host game's chat room session. The host owns the
/// roster; this is the slice of a character record the toolkit consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub member_number: MemberNumber,
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub pronouns: Pronouns,
}

impl Player {
    /// Display name: nickname when set, otherwise the account name.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }
}

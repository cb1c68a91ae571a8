pub mod supply;

pub use supply::WordSupply;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::fs;
use std::path::Path;

use crate::error::GameError;

static WORD_LISTS: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words/lists");

/// Selects which word pool a falling word is drawn from
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WordDifficulty {
    Short,
    Medium,
    Long,
}

impl WordDifficulty {
    pub const ALL: [WordDifficulty; 3] = [
        WordDifficulty::Short,
        WordDifficulty::Medium,
        WordDifficulty::Long,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            WordDifficulty::Short => 0,
            WordDifficulty::Medium => 1,
            WordDifficulty::Long => 2,
        }
    }

    fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// One canonical word list as stored on disk
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct WordPool {
    pub name: String,
    #[serde(default)]
    pub size: u32,
    pub words: Vec<String>,
}

impl WordPool {
    pub fn new<S: Into<String>>(name: &str, words: impl IntoIterator<Item = S>) -> Self {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        }
    }

    /// Lowercase every word, drop duplicates (first occurrence wins) and
    /// reject anything that is not made of ASCII letters.
    fn normalized(self, difficulty: WordDifficulty) -> Result<Self, GameError> {
        let words = self
            .words
            .into_iter()
            .map(|w| w.trim().to_ascii_lowercase())
            .unique()
            .collect::<Vec<String>>();

        if words.is_empty() {
            return Err(GameError::EmptyWordPool(difficulty));
        }
        if let Some(bad) = words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(GameError::UntypeableWord {
                difficulty,
                word: bad.clone(),
            });
        }

        Ok(Self {
            name: self.name,
            size: words.len() as u32,
            words,
        })
    }
}

/// Validated pools for every difficulty
#[derive(Clone, Debug)]
pub struct WordPools {
    pools: [WordPool; 3],
}

impl WordPools {
    /// Build from explicit pools; every pool must be non-empty and typeable
    pub fn new(short: WordPool, medium: WordPool, long: WordPool) -> Result<Self, GameError> {
        Ok(Self {
            pools: [
                short.normalized(WordDifficulty::Short)?,
                medium.normalized(WordDifficulty::Medium)?,
                long.normalized(WordDifficulty::Long)?,
            ],
        })
    }

    /// Word lists bundled into the binary
    pub fn embedded() -> Result<Self, GameError> {
        Self::load_with(|difficulty| {
            let file = WORD_LISTS
                .get_file(difficulty.file_name())
                .ok_or(GameError::MissingWordList(difficulty))?;
            let contents = file
                .contents_utf8()
                .ok_or(GameError::MissingWordList(difficulty))?;
            Ok(from_str(contents)?)
        })
    }

    /// Read `short.json`, `medium.json` and `long.json` from a directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, GameError> {
        let dir = dir.as_ref();
        Self::load_with(|difficulty| {
            let path = dir.join(difficulty.file_name());
            if !path.exists() {
                return Err(GameError::MissingWordList(difficulty));
            }
            let contents = fs::read_to_string(path)?;
            Ok(from_str(&contents)?)
        })
    }

    fn load_with<F>(mut load: F) -> Result<Self, GameError>
    where
        F: FnMut(WordDifficulty) -> Result<WordPool, GameError>,
    {
        let short = load(WordDifficulty::Short)?;
        let medium = load(WordDifficulty::Medium)?;
        let long = load(WordDifficulty::Long)?;
        let pools = Self::new(short, medium, long)?;
        log::debug!(
            "loaded word pools: {}",
            WordDifficulty::ALL
                .iter()
                .map(|d| format!("{d}={}", pools.pool(*d).words.len()))
                .join(", ")
        );
        Ok(pools)
    }

    pub fn pool(&self, difficulty: WordDifficulty) -> &WordPool {
        &self.pools[difficulty.index()]
    }
}

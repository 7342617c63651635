//! Score book: best score, play count and last result per game id.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format that still loads. Only bump on
//!   breaking changes (renamed or removed fields); older payloads are dropped.
//!
//! The browser build keeps the book in `localStorage`; natively it lives
//! only in memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::score::{game_id, ScoreRecord};
use crate::session::GameKind;

// Only the browser build persists the book.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const SAVE_VERSION: u32 = 1;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "brain_games_scores";

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, thiserror::Error)]
pub enum ScoreBookError {
    #[error("score book is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("score book version {found} is older than {min}")]
    TooOld { found: u32, min: u32 },
    #[error("localStorage unavailable")]
    NoStorage,
    #[error("localStorage write failed: {0}")]
    Write(String),
}

/// Per-game tally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreEntry {
    pub best: u32,
    pub plays: u32,
    pub last: Option<ScoreRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBook {
    entries: BTreeMap<String, ScoreEntry>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    #[serde(default)]
    games: BTreeMap<String, ScoreEntry>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a finished session. Returns true if it set a new best.
    pub fn record(&mut self, record: &ScoreRecord) -> bool {
        let entry = self.entries.entry(record.game_id()).or_default();
        let new_best = entry.plays == 0 || record.score > entry.best;
        entry.plays += 1;
        if new_best {
            entry.best = record.score;
        }
        entry.last = Some(record.clone());
        new_best
    }

    pub fn entry(&self, game_id: &str) -> Option<&ScoreEntry> {
        self.entries.get(game_id)
    }

    /// Best score for `kind` under the given session tag.
    pub fn best(&self, session: Option<&str>, kind: GameKind) -> Option<u32> {
        self.entry(&game_id(session, kind)).map(|e| e.best)
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn to_json(&self) -> Result<String, ScoreBookError> {
        let data = SaveData {
            version: SAVE_VERSION,
            games: self.entries.clone(),
        };
        Ok(serde_json::to_string(&data)?)
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn from_json(json: &str) -> Result<Self, ScoreBookError> {
        let data: SaveData = serde_json::from_str(json)?;
        if data.version < MIN_COMPATIBLE_VERSION {
            return Err(ScoreBookError::TooOld {
                found: data.version,
                min: MIN_COMPATIBLE_VERSION,
            });
        }
        Ok(Self {
            entries: data.games,
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the stored book. Missing data gives an empty book; unreadable data
/// is discarded with a warning.
#[cfg(target_arch = "wasm32")]
pub fn load() -> ScoreBook {
    let Some(storage) = get_storage() else {
        log::warn!("score book: {}", ScoreBookError::NoStorage);
        return ScoreBook::new();
    };
    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return ScoreBook::new(),
    };
    match ScoreBook::from_json(&json) {
        Ok(book) => {
            log::debug!("score book: loaded {} games", book.len());
            book
        }
        Err(e) => {
            log::warn!("score book: {} (discarding)", e);
            let _ = storage.remove_item(STORAGE_KEY);
            ScoreBook::new()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> ScoreBook {
    ScoreBook::new()
}

#[cfg(target_arch = "wasm32")]
pub fn save(book: &ScoreBook) -> Result<(), ScoreBookError> {
    let json = book.to_json()?;
    let storage = get_storage().ok_or(ScoreBookError::NoStorage)?;
    storage
        .set_item(STORAGE_KEY, &json)
        .map_err(|e| ScoreBookError::Write(format!("{:?}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_book: &ScoreBook) -> Result<(), ScoreBookError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: GameKind, score: u32, session: Option<&str>) -> ScoreRecord {
        ScoreRecord {
            kind,
            score,
            elapsed_secs: 30,
            session_id: session.map(String::from),
        }
    }

    #[test]
    fn keeps_best_plays_and_last() {
        let mut book = ScoreBook::new();
        assert!(book.record(&record(GameKind::MemoryMatch, 820, None)));
        assert!(!book.record(&record(GameKind::MemoryMatch, 700, None)));
        assert!(book.record(&record(GameKind::MemoryMatch, 910, None)));

        let entry = book.entry("memory").unwrap();
        assert_eq!(entry.best, 910);
        assert_eq!(entry.plays, 3);
        assert_eq!(entry.last.as_ref().map(|r| r.score), Some(910));
    }

    #[test]
    fn first_play_of_zero_is_a_best() {
        let mut book = ScoreBook::new();
        assert!(book.record(&record(GameKind::PatternRecall, 0, None)));
        assert_eq!(book.best(None, GameKind::PatternRecall), Some(0));
        assert_eq!(book.best(None, GameKind::MemoryMatch), None);
    }

    #[test]
    fn sessions_are_filed_separately() {
        let mut book = ScoreBook::new();
        book.record(&record(GameKind::ArithmeticSpeed, 40, Some("course-3")));
        book.record(&record(GameKind::ArithmeticSpeed, 90, None));
        assert_eq!(book.best(Some("course-3"), GameKind::ArithmeticSpeed), Some(40));
        assert_eq!(book.best(None, GameKind::ArithmeticSpeed), Some(90));
        assert!(book.entry("course-3-math").is_some());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn json_survives_save_and_load() {
        let mut book = ScoreBook::new();
        book.record(&record(GameKind::MemoryMatch, 820, Some("c1")));
        book.record(&record(GameKind::PatternRecall, 300, None));
        let json = book.to_json().unwrap();
        assert!(json.contains("\"version\":1"));
        assert_eq!(ScoreBook::from_json(&json).unwrap(), book);
    }

    #[test]
    fn old_version_is_rejected() {
        let err = ScoreBook::from_json(r#"{"version":0,"games":{}}"#).unwrap_err();
        assert!(matches!(err, ScoreBookError::TooOld { found: 0, min: 1 }));
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let err = ScoreBook::from_json("{not json").unwrap_err();
        assert!(matches!(err, ScoreBookError::Parse(_)));
    }

    #[test]
    fn missing_fields_default() {
        let book = ScoreBook::from_json(r#"{"version":1,"games":{"math":{"best":12}}}"#).unwrap();
        let entry = book.entry("math").unwrap();
        assert_eq!(entry.best, 12);
        assert_eq!(entry.plays, 0);
        assert!(entry.last.is_none());
    }

    #[test]
    fn game_id_matches_record() {
        let r = record(GameKind::PatternRecall, 1, Some("s"));
        assert_eq!(game_id(Some("s"), GameKind::PatternRecall), r.game_id());
    }
}

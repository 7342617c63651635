//! Hand-off of finished sessions to whoever keeps score.

use serde::{Deserialize, Serialize};

use crate::session::GameKind;

/// Final result of one finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub kind: GameKind,
    pub score: u32,
    pub elapsed_secs: u32,
    /// Caller-supplied tag; never interpreted by the engines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ScoreRecord {
    /// Key the record is filed under: `"{session}-{slug}"`, or just the slug.
    pub fn game_id(&self) -> String {
        game_id(self.session_id.as_deref(), self.kind)
    }
}

/// Score-book key for a game under an optional session tag.
pub fn game_id(session: Option<&str>, kind: GameKind) -> String {
    match session {
        Some(id) => format!("{}-{}", id, kind.slug()),
        None => kind.slug().to_string(),
    }
}

pub type CompletionCallback = Box<dyn FnMut(&ScoreRecord)>;

/// Invokes the completion callback at most once per session.
///
/// Engines call [`arm`](ScoreReporter::arm) when a session starts and
/// [`report`](ScoreReporter::report) when it reaches its terminal state.
pub struct ScoreReporter {
    session_id: Option<String>,
    callback: Option<CompletionCallback>,
    armed: bool,
}

impl ScoreReporter {
    pub fn new(session_id: Option<String>, callback: CompletionCallback) -> Self {
        Self {
            session_id,
            callback: Some(callback),
            armed: false,
        }
    }

    /// A reporter with nobody listening.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self {
            session_id: None,
            callback: None,
            armed: false,
        }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Build the record and hand it to the callback. Returns `None` if this
    /// session already reported (or was never armed).
    pub fn report(&mut self, kind: GameKind, score: u32, elapsed_secs: u32) -> Option<ScoreRecord> {
        if !self.armed {
            return None;
        }
        self.armed = false;

        let record = ScoreRecord {
            kind,
            score,
            elapsed_secs,
            session_id: self.session_id.clone(),
        };
        log::info!(
            "{} finished: score={} time={}s",
            kind.title(),
            score,
            elapsed_secs
        );
        if let Some(cb) = self.callback.as_mut() {
            cb(&record);
        }
        Some(record)
    }
}

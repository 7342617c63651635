//! Launch configuration read from the page URL query string.
//!
//! `?game=math&difficulty=hard&session=course-12&log=debug`
//!
//! Unknown keys are ignored. A bad value is reported and its default kept,
//! so the page always starts.

use log::LevelFilter;

use crate::games::arithmetic::state::{Difficulty, UnknownDifficulty};
use crate::session::GameKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown game `{0}` (expected memory, math or pattern)")]
    UnknownGame(String),
    #[error(transparent)]
    Difficulty(#[from] UnknownDifficulty),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
    #[error("empty session id")]
    EmptySession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Open this game instead of the menu.
    pub game: Option<GameKind>,
    pub difficulty: Difficulty,
    /// Tag for score records.
    pub session: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            game: None,
            difficulty: Difficulty::default(),
            session: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl LaunchConfig {
    /// Build from already-decoded `(key, value)` pairs. Returns the config
    /// plus one error per rejected value.
    pub fn from_pairs<'k>(
        pairs: impl IntoIterator<Item = (&'k str, String)>,
    ) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (key, value) in pairs {
            let result = match key {
                "game" => GameKind::from_slug(&value)
                    .map(|g| config.game = Some(g))
                    .ok_or(ConfigError::UnknownGame(value)),
                "difficulty" => value
                    .parse::<Difficulty>()
                    .map(|d| config.difficulty = d)
                    .map_err(ConfigError::from),
                "session" if value.trim().is_empty() => Err(ConfigError::EmptySession),
                "session" => {
                    config.session = Some(value.trim().to_string());
                    Ok(())
                }
                "log" => value
                    .parse::<LevelFilter>()
                    .map(|l| config.log_level = l)
                    .map_err(|_| ConfigError::LogLevel(value)),
                _ => Ok(()),
            };
            if let Err(e) = result {
                errors.push(e);
            }
        }

        (config, errors)
    }

    /// Parse a raw query string, with or without its leading `?`. The native
    /// build takes this from its first argument.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        Self::from_pairs(
            query
                .trim_start_matches('?')
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|p| p.split_once('=').unwrap_or((p, "")))
                .map(|(key, raw)| (key, decode(raw))),
        )
    }

    /// Read `window.location.search`, decoded by the browser.
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> (Self, Vec<ConfigError>) {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Self::from_query(&search);
        };
        Self::from_pairs(
            ["game", "difficulty", "session", "log"]
                .into_iter()
                .filter_map(|key| params.get(key).map(|value| (key, value))),
        )
    }
}

/// `+` to space and `%XX` escapes. Malformed escapes are kept as written.
fn decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[i + 1]) << 4 | hex_value(bytes[i + 2]));
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit.to_ascii_uppercase() - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_gives_defaults() {
        let (config, errors) = LaunchConfig::from_query("");
        assert_eq!(config, LaunchConfig::default());
        assert!(errors.is_empty());
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn full_query() {
        let (config, errors) =
            LaunchConfig::from_query("?game=math&difficulty=hard&session=course-12&log=debug");
        assert!(errors.is_empty());
        assert_eq!(config.game, Some(GameKind::ArithmeticSpeed));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.session.as_deref(), Some("course-12"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (config, errors) = LaunchConfig::from_query("utm_source=mail&theme=dark&game=pattern");
        assert!(errors.is_empty());
        assert_eq!(config.game, Some(GameKind::PatternRecall));
    }

    #[test]
    fn malformed_values_fall_back() {
        let (config, errors) =
            LaunchConfig::from_query("game=chess&difficulty=extreme&log=loud&session=");
        assert_eq!(config, LaunchConfig::default());
        assert_eq!(
            errors,
            vec![
                ConfigError::UnknownGame("chess".into()),
                ConfigError::Difficulty(UnknownDifficulty("extreme".into())),
                ConfigError::LogLevel("loud".into()),
                ConfigError::EmptySession,
            ]
        );
    }

    #[test]
    fn later_values_win_and_bad_ones_keep_earlier() {
        let (config, errors) = LaunchConfig::from_query("difficulty=easy&difficulty=nope");
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn values_are_percent_decoded() {
        let (config, _) = LaunchConfig::from_query("session=year+2%2Fclass%20b");
        assert_eq!(config.session.as_deref(), Some("year 2/class b"));
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz"), "%zz");
    }

    #[test]
    fn decoded_pairs_are_taken_verbatim() {
        let (config, errors) = LaunchConfig::from_pairs([
            ("session", "50%25 done".to_string()),
            ("game", "memory".to_string()),
        ]);
        assert!(errors.is_empty());
        assert_eq!(config.session.as_deref(), Some("50%25 done"));
        assert_eq!(config.game, Some(GameKind::MemoryMatch));
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            ConfigError::UnknownGame("chess".into()).to_string(),
            "unknown game `chess` (expected memory, math or pattern)"
        );
        assert_eq!(
            ConfigError::from(UnknownDifficulty("x".into())).to_string(),
            "unknown difficulty `x` (expected easy, medium or hard)"
        );
    }
}

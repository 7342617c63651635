//! Lint: single-key hints like `[1]` in a game's `render.rs` must be tappable.
//!
//! A hint pushed with `cl.push(...)` is drawn but never registered as a click
//! target, so it works on a keyboard and silently does nothing on a phone.
//! Hints belong in `push_clickable(...)` (or a `ButtonGrid` button).
//!
//! Scans every `render.rs` under `src/games/` for `.push(` lines that contain
//! a bracketed single-character key.

use std::fs;
use std::path::Path;

/// `[1]`, `[S]`, `[-]` and friends. `[Enter]` and `[]` don't count.
fn contains_key_hint(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-+=!?".contains(&w[1]))
    })
}

fn find_unclickable_hints(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && contains_key_hint(line)
                && line.contains(".push(")
                && !line.contains("push_clickable(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let display = path.display().to_string();
            for (line_num, line) in find_unclickable_hints(&source) {
                violations.push((display.clone(), line_num, line));
            }
        }
    }
}

#[test]
fn key_hints_in_render_files_are_clickable() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut violations = Vec::new();
    visit_render_files(&games_dir, &mut violations);

    if !violations.is_empty() {
        let mut msg = String::from(
            "Key hints [X] pushed as plain lines; use push_clickable() instead:\n\n",
        );
        for (file, line_num, line) in &violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_exist_for_every_game() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    for game in ["memory", "pattern", "arithmetic"] {
        assert!(games_dir.join(game).join("render.rs").is_file(), "{} has no render.rs", game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_plain_push_with_hint() {
        let source = r#"cl.push(Line::from(" [1] Memory Match"));"#;
        assert_eq!(find_unclickable_hints(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [S] Start"), START);"#;
        assert!(find_unclickable_hints(source).is_empty());
    }

    #[test]
    fn ignores_comments_and_long_labels() {
        assert!(find_unclickable_hints(r#"// cl.push(Line::from(" [1] Easy"));"#).is_empty());
        assert!(find_unclickable_hints(r#"cl.push(Line::from(" [Enter] New Game"));"#).is_empty());
    }

    #[test]
    fn key_hint_detection() {
        assert!(contains_key_hint("[1]"));
        assert!(contains_key_hint("press [s] to start"));
        assert!(contains_key_hint("[-]"));
        assert!(!contains_key_hint("[]"));
        assert!(!contains_key_hint("[Esc]"));
        assert!(!contains_key_hint("ab"));
    }
}

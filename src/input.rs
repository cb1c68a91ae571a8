use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, ModifierKeyCode};

use crate::enemy::{EnemyId, EnemyRegistry};
use crate::playfield::Playfield;
use crate::session::SessionState;

/// Key classes the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Letter(char),
    Backspace,
    Space,
    Enter,
    Shift,
    Ignored,
}

impl From<KeyEvent> for GameKey {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return GameKey::Ignored;
        }
        match key.code {
            KeyCode::Char(' ') => GameKey::Space,
            KeyCode::Char(c) => accept_letter(c).map_or(GameKey::Ignored, GameKey::Letter),
            KeyCode::Backspace => GameKey::Backspace,
            KeyCode::Enter => GameKey::Enter,
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                GameKey::Shift
            }
            _ => GameKey::Ignored,
        }
    }
}

/// Lowercased letter, or `None` for anything that is not an ASCII letter
pub fn accept_letter(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_lowercase())
}

/// Append to the typed echo. Returns false if the char was rejected.
pub fn push_letter(state: &mut SessionState, c: char) -> bool {
    match accept_letter(c) {
        Some(letter) => {
            state.typed.push(letter);
            true
        }
        None => false,
    }
}

pub fn pop_letter(state: &mut SessionState) -> Option<char> {
    state.typed.pop()
}

/// The enemy `typed` should destroy: an exact word match, furthest fallen
/// first; equal positions go to the earlier spawn.
pub fn find_target<P: Playfield + ?Sized>(
    enemies: &EnemyRegistry,
    field: &P,
    typed: &str,
) -> Option<EnemyId> {
    if typed.is_empty() {
        return None;
    }
    enemies
        .iter()
        .filter(|e| e.word == typed)
        .map(|e| (e.id, field.position(e.body).unwrap_or(f32::NEG_INFINITY)))
        .fold(None, |best: Option<(EnemyId, f32)>, (id, y)| match best {
            Some((_, best_y)) if best_y >= y => best,
            _ => Some((id, y)),
        })
        .map(|(id, _)| id)
}

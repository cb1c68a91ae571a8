use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::enemy::EnemyId;
use crate::game::Game;
use crate::playfield::Playfield;
use crate::runtime::KeySource;

/// How the simulated typist behaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypistProfile {
    pub chars_per_second: f64,
    /// Chance that a letter comes out wrong and has to be backspaced
    pub error_rate: f64,
    /// A held power-up is spent once the target falls past this height
    pub panic_height: f32,
}

impl Default for TypistProfile {
    fn default() -> Self {
        Self {
            chars_per_second: 6.0,
            error_rate: 0.05,
            panic_height: 480.0,
        }
    }
}

/// Deterministic simulated typist that always chases the most urgent word
#[derive(Debug)]
pub struct Autoplayer {
    profile: TypistProfile,
    rng: StdRng,
    budget: f64,
    target: Option<EnemyId>,
    needs_fix: bool,
}

impl Autoplayer {
    pub fn new(seed: u64, profile: TypistProfile) -> Self {
        Self {
            profile: TypistProfile {
                chars_per_second: finite_or_zero(profile.chars_per_second).max(0.0),
                error_rate: finite_or_zero(profile.error_rate).clamp(0.0, 1.0),
                ..profile
            },
            rng: StdRng::seed_from_u64(seed),
            budget: 0.0,
            target: None,
            needs_fix: false,
        }
    }

    pub fn profile(&self) -> &TypistProfile {
        &self.profile
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn choose<P: Playfield + ?Sized>(&mut self, game: &Game, field: &P) -> Option<KeyEvent> {
        if self.needs_fix {
            self.needs_fix = false;
            return Some(Self::press(KeyCode::Backspace));
        }

        let locked = self.target.and_then(|id| game.enemies().get(id));
        let target = match locked {
            Some(enemy) => enemy,
            None => game.most_urgent(field)?,
        };
        self.target = Some(target.id);

        let y = field.position(target.body).unwrap_or(f32::NEG_INFINITY);
        if game.state().current_power_up.is_some() && !game.is_frozen() && y >= self.profile.panic_height {
            return Some(Self::press(KeyCode::Modifier(ModifierKeyCode::LeftShift)));
        }

        let typed = game.state().typed.as_str();
        if typed == target.word || !target.word.starts_with(typed) {
            // a finished word is submitted; a stray prefix is flushed the same way
            self.target = None;
            return Some(Self::press(KeyCode::Enter));
        }

        let next = target.word[typed.len()..].chars().next()?;
        if self.rng.gen_bool(self.profile.error_rate) {
            self.needs_fix = true;
            return Some(Self::press(KeyCode::Char(self.wrong_letter(next))));
        }
        Some(Self::press(KeyCode::Char(next)))
    }

    fn wrong_letter(&mut self, right: char) -> char {
        let offset = self.rng.gen_range(1..26u8);
        let base = (right as u8).wrapping_sub(b'a') % 26;
        (b'a' + (base + offset) % 26) as char
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl KeySource for Autoplayer {
    fn begin_frame(&mut self, dt_ms: u64) {
        let earned = self.profile.chars_per_second * dt_ms as f64 / 1000.0;
        // no banking keystrokes across idle stretches
        self.budget = (self.budget + earned).min(self.profile.chars_per_second.max(1.0));
    }

    fn next_key<P: Playfield + ?Sized>(&mut self, game: &Game, field: &P) -> Option<KeyEvent> {
        if game.is_game_over() || self.budget < 1.0 {
            return None;
        }
        let key = self.choose(game, field)?;
        self.budget -= 1.0;
        Some(key)
    }
}

use serde::Serialize;

use crate::config::GameConfig;
use crate::power_up::PowerUp;
use crate::time_series::TimeSeriesPoint;

pub const RESTART_PROMPT: &str = "Press SPACE to restart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Active,
    GameOver,
}

/// Everything one play session mutates. Restart rebuilds it from the config.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u64,
    pub lives: u32,
    /// Letters accepted since the last backspace
    pub combo: u32,
    pub words_typed: u32,
    pub characters_typed: u32,
    /// Game clock, only running after the first successful match
    pub elapsed_seconds: u32,
    pub current_power_up: Option<PowerUp>,
    pub spawn_delay_ms: u64,
    pub next_enemy_id: u64,
    pub phase: Phase,
    pub typed: String,
    pub wpm: f64,
    pub wpm_coords: Vec<TimeSeriesPoint>,
}

impl SessionState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: config.lives,
            combo: 0,
            words_typed: 0,
            characters_typed: 0,
            elapsed_seconds: 0,
            current_power_up: None,
            spawn_delay_ms: config.initial_spawn_delay_ms,
            next_enemy_id: 1,
            phase: Phase::Active,
            typed: String::new(),
            wpm: 0.0,
            wpm_coords: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn final_stats(&self) -> FinalStats {
        FinalStats {
            score: self.score,
            wpm: self.wpm.round() as u32,
            words_typed: self.words_typed,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalStats {
    pub score: u64,
    pub wpm: u32,
    pub words_typed: u32,
    pub elapsed_seconds: u32,
}

/// What the display collaborator draws each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub elapsed_seconds: u32,
    pub combo: u32,
    pub power_up: Option<String>,
    /// Id of the held power-up, 0 when the slot is empty
    pub power_up_id: u32,
    pub typed: String,
    pub game_over: Option<GameOverScreen>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverScreen {
    pub stats: FinalStats,
    pub prompt: &'static str,
}

impl From<&SessionState> for Hud {
    fn from(state: &SessionState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            elapsed_seconds: state.elapsed_seconds,
            combo: state.combo,
            power_up: state.current_power_up.map(|p| p.to_string()),
            power_up_id: state.current_power_up.map_or(0, PowerUp::id),
            typed: state.typed.clone(),
            game_over: state.is_game_over().then(|| GameOverScreen {
                stats: state.final_stats(),
                prompt: RESTART_PROMPT,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_matches_config() {
        let config = GameConfig {
            lives: 5,
            initial_spawn_delay_ms: 1200,
            ..GameConfig::default()
        };
        let state = SessionState::new(&config);

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 5);
        assert_eq!(state.spawn_delay_ms, 1200);
        assert_eq!(state.next_enemy_id, 1);
        assert_eq!(state.phase, Phase::Active);
        assert!(state.current_power_up.is_none());
    }

    #[test]
    fn final_stats_round_wpm() {
        let mut state = SessionState::new(&GameConfig::default());
        state.score = 120;
        state.wpm = 41.6;

        assert_eq!(state.final_stats().wpm, 42);
        assert_eq!(state.final_stats().score, 120);
    }

    #[test]
    fn hud_shows_game_over_only_when_over() {
        let mut state = SessionState::new(&GameConfig::default());
        state.typed = "roc".into();

        assert_eq!(Hud::from(&state).power_up_id, 0);
        state.current_power_up = Some(PowerUp::Freeze);

        let hud = Hud::from(&state);
        assert_eq!(hud.power_up.as_deref(), Some("Freeze"));
        assert_eq!(hud.power_up_id, 1);
        assert_eq!(hud.typed, "roc");
        assert!(hud.game_over.is_none());

        state.phase = Phase::GameOver;
        let hud = Hud::from(&state);
        assert_eq!(hud.game_over.map(|g| g.prompt), Some(RESTART_PROMPT));
    }
}

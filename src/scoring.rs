use crate::config::GameConfig;
use crate::session::SessionState;
use crate::time_series::TimeSeriesPoint;

/// Point values for a successful match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub base_points: u64,
    pub combo_bonus: u64,
    pub combo_threshold: u32,
}

impl From<&GameConfig> for ScoreRules {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            base_points: cfg.base_points,
            combo_bonus: cfg.combo_bonus,
            combo_threshold: cfg.combo_threshold,
        }
    }
}

impl ScoreRules {
    /// Base points plus one bonus per full `combo_threshold` letters of streak
    pub fn points_for(&self, combo: u32) -> u64 {
        let tiers = (combo / self.combo_threshold.max(1)) as u64;
        self.base_points + tiers * self.combo_bonus
    }
}

pub fn register_letter(state: &mut SessionState) {
    state.combo += 1;
}

pub fn break_combo(state: &mut SessionState) {
    state.combo = 0;
}

/// Book a destroyed word. The combo streak survives matches.
pub fn record_match(state: &mut SessionState, word: &str, rules: &ScoreRules) -> u64 {
    let points = rules.points_for(state.combo);
    state.words_typed += 1;
    state.characters_typed += word.chars().count() as u32;
    state.score += points;
    points
}

/// Standard five-characters-per-word WPM; 0 before the clock has run
pub fn words_per_minute(characters_typed: u32, elapsed_seconds: u32) -> f64 {
    if elapsed_seconds == 0 {
        return 0.0;
    }
    // (chars / 5) / (secs / 60), ordered to keep whole results exact
    characters_typed as f64 * 60.0 / 5.0 / elapsed_seconds as f64
}

/// One second of game clock
pub fn tick_clock(state: &mut SessionState) {
    state.elapsed_seconds += 1;
    state.wpm = words_per_minute(state.characters_typed, state.elapsed_seconds);
    state
        .wpm_coords
        .push(TimeSeriesPoint::new(state.elapsed_seconds as f64, state.wpm));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoreRules {
        ScoreRules::from(&GameConfig::default())
    }

    #[test]
    fn combo_tiers_award_bonus() {
        let rules = rules();

        assert_eq!(rules.points_for(0), 10);
        assert_eq!(rules.points_for(14), 10);
        assert_eq!(rules.points_for(15), 15);
        assert_eq!(rules.points_for(29), 15);
        assert_eq!(rules.points_for(30), 20);
    }

    #[test]
    fn match_updates_counters_and_keeps_combo() {
        let mut state = SessionState::new(&GameConfig::default());
        state.combo = 15;

        let points = record_match(&mut state, "rocket", &rules());

        assert_eq!(points, 15);
        assert_eq!(state.score, 15);
        assert_eq!(state.words_typed, 1);
        assert_eq!(state.characters_typed, 6);
        assert_eq!(state.combo, 15);
    }

    #[test]
    fn letters_build_and_backspace_breaks_combo() {
        let mut state = SessionState::new(&GameConfig::default());

        for _ in 0..7 {
            register_letter(&mut state);
        }
        assert_eq!(state.combo, 7);

        break_combo(&mut state);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn wpm_is_zero_before_clock_runs() {
        assert_eq!(words_per_minute(50, 0), 0.0);
    }

    #[test]
    fn wpm_uses_five_char_words() {
        assert_eq!(words_per_minute(100, 60), 20.0);
        assert_eq!(words_per_minute(50, 30), 20.0);
    }

    #[test]
    fn clock_tick_records_time_series() {
        let mut state = SessionState::new(&GameConfig::default());
        state.characters_typed = 10;

        tick_clock(&mut state);
        tick_clock(&mut state);

        assert_eq!(state.elapsed_seconds, 2);
        assert_eq!(state.wpm, 60.0);
        assert_eq!(
            state.wpm_coords,
            vec![TimeSeriesPoint::new(1.0, 120.0), TimeSeriesPoint::new(2.0, 60.0)]
        );
    }
}

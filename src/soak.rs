use serde::Serialize;
use std::time::Duration;

use crate::autoplay::{Autoplayer, TypistProfile};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::playfield::KinematicPlayfield;
use crate::runtime::{FixedTicker, Runner};
use crate::util::{mean, std_dev};
use crate::words::WordPools;

/// Knobs for a batch of autoplayed sessions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoakOptions {
    pub runs: u32,
    /// Seed of the first run; run `n` uses `base_seed + n`
    pub base_seed: u64,
    pub max_secs: u64,
    pub frame_ms: u64,
    pub typist: TypistProfile,
}

impl Default for SoakOptions {
    fn default() -> Self {
        Self {
            runs: 10,
            base_seed: 0,
            max_secs: 300,
            frame_ms: 16,
            typist: TypistProfile::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run: u32,
    pub seed: u64,
    pub score: u64,
    pub wpm: u32,
    pub words_typed: u32,
    /// Game clock at the end; starts with the first destroyed word
    pub elapsed_seconds: u32,
    /// Frame time survived
    pub survived_ms: u64,
    pub lives_left: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoakReport {
    pub runs: Vec<RunReport>,
    pub mean_score: Option<f64>,
    pub std_dev_score: Option<f64>,
    pub mean_wpm: Option<f64>,
    pub std_dev_wpm: Option<f64>,
    pub mean_survived_secs: Option<f64>,
}

impl SoakReport {
    fn new(runs: Vec<RunReport>) -> Self {
        let scores: Vec<f64> = runs.iter().map(|r| r.score as f64).collect();
        let wpms: Vec<f64> = runs.iter().map(|r| r.wpm as f64).collect();
        let survived: Vec<f64> = runs.iter().map(|r| r.survived_ms as f64 / 1000.0).collect();
        Self {
            mean_score: mean(&scores),
            std_dev_score: std_dev(&scores),
            mean_wpm: mean(&wpms),
            std_dev_wpm: std_dev(&wpms),
            mean_survived_secs: mean(&survived),
            runs,
        }
    }
}

/// Play one autoplayed session to game over or the time limit
pub fn run_once(
    config: &GameConfig,
    pools: &WordPools,
    options: &SoakOptions,
    run: u32,
) -> Result<RunReport, GameError> {
    let seed = options.base_seed.wrapping_add(run as u64);
    let config = GameConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let mut game = Game::new(config, pools.clone())?;
    let mut field = KinematicPlayfield::new();
    let mut typist = Autoplayer::new(seed, options.typist);
    let mut runner = Runner::new(FixedTicker::new(Duration::from_millis(options.frame_ms)));

    let survived_ms = runner.run(
        &mut game,
        &mut field,
        &mut typist,
        options.max_secs.saturating_mul(1000),
    );
    let stats = game.state().final_stats();
    log::info!(
        "run {run} (seed {seed}): score {}, {} wpm, {}s",
        stats.score,
        stats.wpm,
        survived_ms / 1000
    );

    Ok(RunReport {
        run,
        seed,
        score: stats.score,
        wpm: stats.wpm,
        words_typed: stats.words_typed,
        elapsed_seconds: stats.elapsed_seconds,
        survived_ms,
        lives_left: game.state().lives,
        game_over: game.is_game_over(),
    })
}

pub fn run_soak(
    config: &GameConfig,
    pools: &WordPools,
    options: &SoakOptions,
) -> Result<SoakReport, GameError> {
    let runs = (0..options.runs)
        .map(|run| run_once(config, pools, options, run))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SoakReport::new(runs))
}

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyId, EnemyRegistry};
use crate::error::GameError;
use crate::input::{self, GameKey};
use crate::playfield::Playfield;
use crate::power_up::{self, Effects, Freeze, PowerUp};
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::scoring::{self, ScoreRules};
use crate::session::{Hud, Phase, SessionState};
use crate::spawner::{next_spawn_delay, SpawnRoll, SpawnScheduler};
use crate::words::{WordPools, WordSupply};

const CLOCK_INTERVAL_MS: u64 = 1000;

/// Result of a submit that destroyed an enemy
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub enemy: EnemyId,
    pub word: String,
    pub points: u64,
    pub power_up: Option<PowerUp>,
    /// Whether the carried power-up landed in the slot
    pub collected: bool,
}

/// The gameplay session engine
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rules: ScoreRules,
    state: SessionState,
    enemies: EnemyRegistry,
    supply: WordSupply,
    scheduler: Scheduler,
    spawner: SpawnScheduler,
    freeze: Option<Freeze>,
    clock: Option<TimerId>,
    rng: StdRng,
}

impl Game {
    /// Validate the configuration and start a session with both spawn timers armed
    pub fn new(config: GameConfig, pools: WordPools) -> Result<Self, GameError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scheduler = Scheduler::new();
        let spawner = SpawnScheduler::arm(
            &mut scheduler,
            config.initial_spawn_delay_ms,
            config.ramp_interval_ms,
        );
        log::info!(
            "session started: {} lives, spawning every {}ms",
            config.lives,
            config.initial_spawn_delay_ms
        );

        Ok(Self {
            rules: ScoreRules::from(&config),
            state: SessionState::new(&config),
            enemies: EnemyRegistry::new(),
            supply: WordSupply::new(pools),
            scheduler,
            spawner,
            freeze: None,
            clock: None,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    pub fn hud(&self) -> Hud {
        Hud::from(&self.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_some()
    }

    pub fn spawn_interval(&self) -> Option<u64> {
        self.spawner.spawn_interval(&self.scheduler)
    }

    pub fn spawn_remaining(&self) -> Option<u64> {
        self.spawner.spawn_remaining(&self.scheduler)
    }

    /// The active enemy closest to escaping
    pub fn most_urgent<P: Playfield + ?Sized>(&self, field: &P) -> Option<&Enemy> {
        self.enemies
            .iter()
            .filter_map(|e| field.position(e.body).map(|y| (e, y)))
            .fold(None::<(&Enemy, f32)>, |best, (e, y)| match best {
                Some((_, best_y)) if best_y >= y => best,
                _ => Some((e, y)),
            })
            .map(|(e, _)| e)
    }

    /// Route one key from the keyboard feed
    pub fn handle_key<P: Playfield + ?Sized>(&mut self, key: GameKey, field: &mut P) {
        if self.state.is_game_over() {
            if key == GameKey::Space {
                if let Err(err) = self.restart(field) {
                    log::warn!("{err}");
                }
            }
            return;
        }

        match key {
            GameKey::Letter(c) => {
                self.type_char(c);
            }
            GameKey::Backspace => self.backspace(),
            GameKey::Space | GameKey::Enter => {
                self.submit(field);
            }
            GameKey::Shift => {
                self.activate_power_up(field);
            }
            GameKey::Ignored => {}
        }
    }

    pub fn type_char(&mut self, c: char) -> bool {
        if self.state.is_game_over() || !input::push_letter(&mut self.state, c) {
            return false;
        }
        scoring::register_letter(&mut self.state);
        true
    }

    /// Drop the last typed letter; always costs the combo
    pub fn backspace(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        input::pop_letter(&mut self.state);
        scoring::break_combo(&mut self.state);
    }

    /// Match the typed text against the field and clear it
    pub fn submit<P: Playfield + ?Sized>(&mut self, field: &mut P) -> Option<MatchOutcome> {
        if self.state.is_game_over() {
            return None;
        }
        let typed = std::mem::take(&mut self.state.typed);
        let id = input::find_target(&self.enemies, &*field, &typed)?;
        let enemy = self.destroy(id, field)?;

        let points = scoring::record_match(&mut self.state, &enemy.word, &self.rules);
        if self.clock.is_none() {
            self.clock = Some(self.scheduler.every(CLOCK_INTERVAL_MS, Task::Clock));
            log::info!("game clock started");
        }
        let collected = enemy
            .power_up
            .is_some_and(|p| power_up::collect(&mut self.state, p));

        log::debug!(
            "matched {} `{}` for {points} (combo {})",
            enemy.id,
            enemy.word,
            self.state.combo
        );
        Some(MatchOutcome {
            enemy: enemy.id,
            word: enemy.word,
            points,
            power_up: enemy.power_up,
            collected,
        })
    }

    /// Spend the held power-up, if any
    pub fn activate_power_up<P: Playfield + ?Sized>(&mut self, field: &mut P) -> Option<PowerUp> {
        if self.state.is_game_over() {
            return None;
        }
        let held = power_up::take(&mut self.state)?;
        log::info!("activating {held}");
        held.activate(&mut self.effects(field));
        Some(held)
    }

    /// Let `dt_ms` pass on every timer, running what falls due in order
    pub fn advance<P: Playfield + ?Sized>(&mut self, dt_ms: u64, field: &mut P) {
        let mut budget = dt_ms;
        while !self.state.is_game_over() {
            let Some(task) = self.scheduler.pop_due(&mut budget) else {
                break;
            };
            self.run(task, field);
        }
    }

    fn run<P: Playfield + ?Sized>(&mut self, task: Task, field: &mut P) {
        match task {
            Task::Spawn => {
                self.spawn_enemy(field);
            }
            Task::Ramp => self.ramp(),
            Task::Clock => scoring::tick_clock(&mut self.state),
            Task::Expire(p) => p.expire(&mut self.effects(field)),
        }
    }

    fn spawn_enemy<P: Playfield + ?Sized>(&mut self, field: &mut P) -> Option<EnemyId> {
        let difficulty = self.config.spawn_difficulty;
        let Some(word) = self.supply.draw(difficulty, &mut self.rng) else {
            log::error!("{difficulty} word pool is empty, skipping spawn");
            return None;
        };

        let id = EnemyId(self.state.next_enemy_id);
        self.state.next_enemy_id += 1;
        let power_up = PowerUp::for_enemy(id);
        let roll = SpawnRoll::roll(&mut self.rng, &self.config.field);
        let body = field.spawn_body(roll.x, roll.y, roll.velocity);

        log::debug!("spawned {id} `{word}` at x={:.0} v={:.0}", roll.x, roll.velocity);
        self.enemies.insert(Enemy {
            id,
            word,
            power_up,
            body,
            velocity: roll.velocity,
        });
        Some(id)
    }

    fn ramp(&mut self) {
        let next = next_spawn_delay(
            self.state.spawn_delay_ms,
            self.config.spawn_delay_step_ms,
            self.config.min_spawn_delay_ms,
        );
        if next != self.state.spawn_delay_ms {
            self.state.spawn_delay_ms = next;
            self.spawner.retune(&mut self.scheduler, next);
            log::debug!("spawn delay now {next}ms");
        }
    }

    /// Remove every enemy past the bottom boundary, one life each
    pub fn check_boundary<P: Playfield + ?Sized>(&mut self, field: &mut P) -> usize {
        if self.state.is_game_over() {
            return 0;
        }
        let boundary = self.config.field.height;
        let mut escaped = 0;

        for id in self.enemies.ids() {
            let Some(y) = self
                .enemies
                .get(id)
                .and_then(|enemy| field.position(enemy.body))
            else {
                continue;
            };
            if y <= boundary || self.destroy(id, field).is_none() {
                continue;
            }

            escaped += 1;
            self.state.lives = self.state.lives.saturating_sub(1);
            log::debug!("enemy {id} escaped, {} lives left", self.state.lives);
            if self.state.lives == 0 {
                self.enter_game_over(field);
                break;
            }
        }

        self.enemies.sweep();
        escaped
    }

    fn enter_game_over<P: Playfield + ?Sized>(&mut self, field: &mut P) {
        self.state.phase = Phase::GameOver;
        self.effects(field).freeze(None);
        self.scheduler.clear();
        self.clock = None;

        let stats = self.state.final_stats();
        log::info!("game over: score {}, {} wpm", stats.score, stats.wpm);
    }

    /// Start over from the game-over screen
    pub fn restart<P: Playfield + ?Sized>(&mut self, field: &mut P) -> Result<(), GameError> {
        if !self.state.is_game_over() {
            return Err(GameError::SessionActive);
        }

        for enemy in self.enemies.drain() {
            field.destroy(enemy.body);
        }
        self.state = SessionState::new(&self.config);
        self.freeze = None;
        self.clock = None;
        self.supply.reset();
        self.scheduler.clear();
        self.spawner = SpawnScheduler::arm(
            &mut self.scheduler,
            self.config.initial_spawn_delay_ms,
            self.config.ramp_interval_ms,
        );

        log::info!("session restarted");
        Ok(())
    }

    fn destroy<P: Playfield + ?Sized>(&mut self, id: EnemyId, field: &mut P) -> Option<Enemy> {
        match self.enemies.remove(id) {
            Ok(enemy) => {
                field.destroy(enemy.body);
                Some(enemy)
            }
            Err(err) => {
                if cfg!(debug_assertions) {
                    panic!("{err}");
                }
                log::error!("{err}");
                None
            }
        }
    }

    fn effects<'a, P: Playfield + ?Sized>(&'a mut self, field: &'a mut P) -> Effects<'a, P> {
        Effects {
            enemies: &mut self.enemies,
            scheduler: &mut self.scheduler,
            spawner: &self.spawner,
            field,
            freeze: &mut self.freeze,
            freeze_duration_ms: self.config.freeze_duration_ms,
        }
    }
}

use rand::Rng;

use crate::config::FieldConfig;
use crate::scheduler::{Scheduler, Task, TimerId};

/// The spawn/ramp timer pair
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    spawn_timer: TimerId,
    ramp_timer: TimerId,
}

impl SpawnScheduler {
    pub fn arm(scheduler: &mut Scheduler, spawn_delay_ms: u64, ramp_interval_ms: u64) -> Self {
        Self {
            spawn_timer: scheduler.every(spawn_delay_ms, Task::Spawn),
            ramp_timer: scheduler.every(ramp_interval_ms, Task::Ramp),
        }
    }

    pub fn pause(&self, scheduler: &mut Scheduler) {
        scheduler.pause(self.spawn_timer);
        scheduler.pause(self.ramp_timer);
    }

    pub fn resume(&self, scheduler: &mut Scheduler) {
        scheduler.resume(self.spawn_timer);
        scheduler.resume(self.ramp_timer);
    }

    pub fn is_paused(&self, scheduler: &Scheduler) -> bool {
        scheduler.is_paused(self.spawn_timer) && scheduler.is_paused(self.ramp_timer)
    }

    /// Swap the spawn timer for one running at `spawn_delay_ms`
    pub fn retune(&mut self, scheduler: &mut Scheduler, spawn_delay_ms: u64) {
        match scheduler.replace(self.spawn_timer, spawn_delay_ms) {
            Some(id) => self.spawn_timer = id,
            None => {
                log::warn!("spawn timer was not armed, arming a new one");
                self.spawn_timer = scheduler.every(spawn_delay_ms, Task::Spawn);
            }
        }
    }

    pub fn spawn_interval(&self, scheduler: &Scheduler) -> Option<u64> {
        scheduler.interval(self.spawn_timer)
    }

    /// Time until the next spawn; frozen while the pair is paused
    pub fn spawn_remaining(&self, scheduler: &Scheduler) -> Option<u64> {
        scheduler.remaining(self.spawn_timer)
    }
}

/// Spawn delay after one ramp step, never below `floor_ms`
pub fn next_spawn_delay(current_ms: u64, step_ms: u64, floor_ms: u64) -> u64 {
    current_ms.saturating_sub(step_ms).max(floor_ms)
}

/// Where a new enemy appears and how fast it falls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRoll {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

impl SpawnRoll {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, field: &FieldConfig) -> Self {
        Self {
            x: rng.gen_range(field.min_x..=field.max_x),
            y: field.spawn_y,
            velocity: rng.gen_range(field.min_speed..=field.max_speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn delay_steps_down_to_floor() {
        assert_eq!(next_spawn_delay(1000, 50, 400), 950);
        assert_eq!(next_spawn_delay(420, 50, 400), 400);
        assert_eq!(next_spawn_delay(400, 50, 400), 400);
        assert_eq!(next_spawn_delay(30, 50, 10), 10);
    }

    #[test]
    fn pair_pauses_and_resumes_together() {
        let mut scheduler = Scheduler::new();
        let spawner = SpawnScheduler::arm(&mut scheduler, 1000, 10_000);

        spawner.pause(&mut scheduler);
        assert!(spawner.is_paused(&scheduler));

        spawner.resume(&mut scheduler);
        assert!(!spawner.is_paused(&scheduler));
    }

    #[test]
    fn retune_replaces_spawn_timer_only() {
        let mut scheduler = Scheduler::new();
        let mut spawner = SpawnScheduler::arm(&mut scheduler, 1000, 10_000);

        spawner.retune(&mut scheduler, 950);

        assert_eq!(spawner.spawn_interval(&scheduler), Some(950));
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn rolls_stay_in_configured_ranges() {
        let field = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let roll = SpawnRoll::roll(&mut rng, &field);
            assert!((field.min_x..=field.max_x).contains(&roll.x));
            assert!((field.min_speed..=field.max_speed).contains(&roll.velocity));
            assert_eq!(roll.y, field.spawn_y);
        }
    }

    #[test]
    fn rolls_are_reproducible_from_seed() {
        let field = FieldConfig::default();
        let a = SpawnRoll::roll(&mut StdRng::seed_from_u64(5), &field);
        let b = SpawnRoll::roll(&mut StdRng::seed_from_u64(5), &field);

        assert_eq!(a, b);
    }
}

use serde::{Deserialize, Serialize};

use crate::enemy::{EnemyId, EnemyRegistry};
use crate::playfield::Playfield;
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::session::SessionState;
use crate::spawner::SpawnScheduler;

/// Every kind of power-up an enemy can carry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum PowerUp {
    /// Halts spawning and every falling word for a while
    Freeze,
}

impl PowerUp {
    /// Numeric id shown next to the slot; 0 is reserved for an empty slot
    pub fn id(self) -> u32 {
        match self {
            PowerUp::Freeze => 1,
        }
    }

    /// Power-up an enemy is born with: ids 20, 30, 40, ... carry one, 10 does not
    pub fn for_enemy(id: EnemyId) -> Option<Self> {
        (id.0 > 10 && id.0 % 10 == 0).then_some(PowerUp::Freeze)
    }

    pub(crate) fn activate<P: Playfield + ?Sized>(self, fx: &mut Effects<'_, P>) {
        match self {
            PowerUp::Freeze => {
                let duration = fx.freeze_duration_ms;
                fx.freeze(Some(duration));
            }
        }
    }

    pub(crate) fn expire<P: Playfield + ?Sized>(self, fx: &mut Effects<'_, P>) {
        match self {
            PowerUp::Freeze => fx.thaw(),
        }
    }
}

/// Put a collected power-up in the slot. A full slot discards it.
pub fn collect(state: &mut SessionState, power_up: PowerUp) -> bool {
    if state.current_power_up.is_some() {
        log::debug!("slot full, discarding {power_up}");
        return false;
    }
    state.current_power_up = Some(power_up);
    true
}

/// Empty the slot, returning what was in it
pub fn take(state: &mut SessionState) -> Option<PowerUp> {
    state.current_power_up.take()
}

/// Velocities held back while a freeze is running
#[derive(Debug, Default)]
pub struct Freeze {
    saved: Vec<(EnemyId, f32)>,
    expiry: Option<TimerId>,
}

impl Freeze {
    pub fn is_timed(&self) -> bool {
        self.expiry.is_some()
    }

    fn has_saved(&self, id: EnemyId) -> bool {
        self.saved.iter().any(|(saved, _)| *saved == id)
    }
}

/// Everything a power-up effect may touch
pub(crate) struct Effects<'a, P: Playfield + ?Sized> {
    pub enemies: &'a mut EnemyRegistry,
    pub scheduler: &'a mut Scheduler,
    pub spawner: &'a SpawnScheduler,
    pub field: &'a mut P,
    pub freeze: &'a mut Option<Freeze>,
    pub freeze_duration_ms: u64,
}

impl<P: Playfield + ?Sized> Effects<'_, P> {
    /// Stop spawning and zero every enemy's fall velocity.
    ///
    /// With a duration the freeze thaws on its own; a running freeze is
    /// extended rather than stacked. Without one it lasts until restart.
    pub fn freeze(&mut self, duration_ms: Option<u64>) {
        self.spawner.pause(self.scheduler);

        let frozen = self.freeze.get_or_insert_with(Freeze::default);
        for enemy in self.enemies.iter_mut() {
            if !frozen.has_saved(enemy.id) {
                frozen.saved.push((enemy.id, enemy.velocity));
            }
            enemy.velocity = 0.0;
            self.field.set_velocity(enemy.body, 0.0);
        }

        if let Some(old) = frozen.expiry.take() {
            self.scheduler.cancel(old);
        }
        frozen.expiry = duration_ms.map(|ms| self.scheduler.once(ms, Task::Expire(PowerUp::Freeze)));

        log::debug!(
            "froze {} enemies for {}",
            frozen.saved.len(),
            duration_ms.map_or("good".to_string(), |ms| format!("{ms}ms"))
        );
    }

    /// Give surviving enemies their velocity back and restart spawning
    pub fn thaw(&mut self) {
        let Some(frozen) = self.freeze.take() else {
            return;
        };
        for (id, velocity) in frozen.saved {
            match self.enemies.get_mut(id) {
                Some(enemy) => {
                    enemy.velocity = velocity;
                    self.field.set_velocity(enemy.body, velocity);
                }
                None => log::debug!("enemy {id} gone before thaw, skipping"),
            }
        }
        self.spawner.resume(self.scheduler);
    }
}

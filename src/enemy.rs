use std::fmt;

use crate::error::GameError;
use crate::playfield::BodyId;
use crate::power_up::PowerUp;

/// Session-unique enemy id, assigned in spawn order and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId(pub u64);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One falling word
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub word: String,
    pub power_up: Option<PowerUp>,
    pub body: BodyId,
    /// Last fall velocity the engine set on `body`
    pub velocity: f32,
}

/// Active enemies in spawn order.
///
/// Removal leaves a tombstone so a pass over `ids()` stays stable while
/// enemies are destroyed; `sweep` compacts between passes.
#[derive(Debug, Default)]
pub struct EnemyRegistry {
    slots: Vec<Slot>,
    live: usize,
}

#[derive(Debug)]
struct Slot {
    id: EnemyId,
    enemy: Option<Enemy>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids must arrive in increasing order
    pub fn insert(&mut self, enemy: Enemy) {
        debug_assert!(
            self.slots.last().map_or(true, |last| last.id < enemy.id),
            "enemy ids must be inserted in increasing order"
        );
        self.slots.push(Slot {
            id: enemy.id,
            enemy: Some(enemy),
        });
        self.live += 1;
    }

    fn slot(&self, id: EnemyId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |s| s.id).ok()
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.slot(id).and_then(|i| self.slots[i].enemy.as_ref())
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.slot(id).and_then(|i| self.slots[i].enemy.as_mut())
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.get(id).is_some()
    }

    /// Take an enemy out of play. Removing an inactive id is a contract violation.
    pub fn remove(&mut self, id: EnemyId) -> Result<Enemy, GameError> {
        let enemy = self
            .slot(id)
            .and_then(|i| self.slots[i].enemy.take())
            .ok_or(GameError::EnemyNotActive(id))?;
        self.live -= 1;
        Ok(enemy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.slots.iter().filter_map(|s| s.enemy.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.slots.iter_mut().filter_map(|s| s.enemy.as_mut())
    }

    /// Snapshot of active ids, safe to walk while removing
    pub fn ids(&self) -> Vec<EnemyId> {
        self.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop tombstones
    pub fn sweep(&mut self) {
        self.slots.retain(|s| s.enemy.is_some());
    }

    /// Empty the registry, handing back whatever was still active
    pub fn drain(&mut self) -> Vec<Enemy> {
        self.live = 0;
        self.slots.drain(..).filter_map(|s| s.enemy).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn enemy(id: u64, word: &str) -> Enemy {
        Enemy {
            id: EnemyId(id),
            word: word.to_string(),
            power_up: None,
            body: BodyId(id),
            velocity: 60.0,
        }
    }

    fn registry(ids: &[u64]) -> EnemyRegistry {
        let mut reg = EnemyRegistry::new();
        for id in ids {
            reg.insert(enemy(*id, "word"));
        }
        reg
    }

    #[test]
    fn insert_and_lookup() {
        let reg = registry(&[1, 2, 3]);

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get(EnemyId(2)).map(|e| e.id), Some(EnemyId(2)));
        assert!(reg.get(EnemyId(4)).is_none());
    }

    #[test]
    fn remove_returns_enemy_once() {
        let mut reg = registry(&[1, 2]);

        let removed = reg.remove(EnemyId(1)).unwrap();
        assert_eq!(removed.id, EnemyId(1));
        assert_eq!(reg.len(), 1);

        assert_matches!(reg.remove(EnemyId(1)), Err(GameError::EnemyNotActive(EnemyId(1))));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn lookup_survives_tombstones() {
        let mut reg = registry(&[1, 2, 3, 4, 5, 6, 7]);
        reg.remove(EnemyId(2)).unwrap();
        reg.remove(EnemyId(3)).unwrap();
        reg.remove(EnemyId(5)).unwrap();

        for id in [1, 4, 6, 7] {
            assert!(reg.contains(EnemyId(id)), "enemy {id} should still be found");
        }
        for id in [2, 3, 5] {
            assert!(!reg.contains(EnemyId(id)));
        }
    }

    #[test]
    fn removing_during_snapshot_walk_visits_everyone_once() {
        let mut reg = registry(&[1, 2, 3, 4]);
        let mut visited = Vec::new();

        for id in reg.ids() {
            visited.push(id);
            if id.0 % 2 == 0 {
                reg.remove(id).unwrap();
            }
        }

        assert_eq!(visited, vec![EnemyId(1), EnemyId(2), EnemyId(3), EnemyId(4)]);
        assert_eq!(reg.ids(), vec![EnemyId(1), EnemyId(3)]);
    }

    #[test]
    fn sweep_keeps_order_and_count() {
        let mut reg = registry(&[1, 2, 3]);
        reg.remove(EnemyId(2)).unwrap();

        reg.sweep();

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.ids(), vec![EnemyId(1), EnemyId(3)]);
        assert!(reg.contains(EnemyId(3)));
    }

    #[test]
    fn drain_empties_registry() {
        let mut reg = registry(&[1, 2, 3]);
        reg.remove(EnemyId(1)).unwrap();

        let drained = reg.drain();

        assert_eq!(drained.len(), 2);
        assert!(reg.is_empty());
        assert!(reg.ids().is_empty());
    }
}

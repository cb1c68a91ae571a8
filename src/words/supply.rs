use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use super::{WordDifficulty, WordPools};

/// Deals words one at a time, walking a fresh shuffle of the pool on every pass
#[derive(Debug, Clone)]
pub struct WordSupply {
    pools: WordPools,
    queues: [VecDeque<String>; 3],
}

impl WordSupply {
    pub fn new(pools: WordPools) -> Self {
        Self {
            pools,
            queues: Default::default(),
        }
    }

    /// Next word of the current pass, reshuffling the full pool when the pass is exhausted.
    ///
    /// Only `None` if the pool itself is empty, which `WordPools` rules out.
    pub fn draw<R: Rng + ?Sized>(&mut self, difficulty: WordDifficulty, rng: &mut R) -> Option<String> {
        let queue = &mut self.queues[difficulty.index()];
        if queue.is_empty() {
            let mut pass = self.pools.pool(difficulty).words.clone();
            pass.shuffle(rng);
            log::debug!("reshuffled {difficulty} pool ({} words)", pass.len());
            queue.extend(pass);
        }
        queue.pop_front()
    }

    /// Words left in the current pass
    pub fn remaining(&self, difficulty: WordDifficulty) -> usize {
        self.queues[difficulty.index()].len()
    }

    /// Forget every in-progress pass
    pub fn reset(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
    }
}

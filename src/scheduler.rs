use crate::power_up::PowerUp;

/// Work a timer hands back to the engine when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Spawn,
    Ramp,
    Clock,
    Expire(PowerUp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    task: Task,
    interval_ms: u64,
    remaining_ms: u64,
    repeating: bool,
    paused: bool,
}

/// Cooperative single-threaded timer set.
///
/// Time only moves through `pop_due`; timers fire in chronological order,
/// ties in creation order, and the caller handles each firing before the
/// next one is chosen.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, delay_ms: u64, task: Task, repeating: bool) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let delay_ms = delay_ms.max(1);
        self.timers.push(Timer {
            id,
            task,
            interval_ms: delay_ms,
            remaining_ms: delay_ms,
            repeating,
            paused: false,
        });
        id
    }

    /// Fire `task` once after `delay_ms`
    pub fn once(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.add(delay_ms, task, false)
    }

    /// Fire `task` every `interval_ms`, first firing one interval from now
    pub fn every(&mut self, interval_ms: u64, task: Task) -> TimerId {
        self.add(interval_ms, task, true)
    }

    /// Stop a timer for good. Returns false if it was already gone.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel `id` and arm a fresh repeating timer for the same task.
    ///
    /// The old timer can no longer fire once this returns.
    pub fn replace(&mut self, id: TimerId, interval_ms: u64) -> Option<TimerId> {
        let pos = self.timers.iter().position(|t| t.id == id)?;
        let old = self.timers.remove(pos);
        let new_id = self.add(interval_ms, old.task, true);
        if old.paused {
            self.pause(new_id);
        }
        Some(new_id)
    }

    pub fn pause(&mut self, id: TimerId) {
        if let Some(t) = self.timers.iter_mut().find(|t| t.id == id) {
            t.paused = true;
        }
    }

    pub fn resume(&mut self, id: TimerId) {
        if let Some(t) = self.timers.iter_mut().find(|t| t.id == id) {
            t.paused = false;
        }
    }

    pub fn is_paused(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id && t.paused)
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Time left until `id` next fires
    pub fn remaining(&self, id: TimerId) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.remaining_ms)
    }

    pub fn interval(&self, id: TimerId) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.interval_ms)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn elapse(&mut self, ms: u64) {
        for t in self.timers.iter_mut().filter(|t| !t.paused) {
            t.remaining_ms = t.remaining_ms.saturating_sub(ms);
        }
    }

    /// Spend up to `budget_ms` of time and return the next task due within it.
    ///
    /// On `Some`, `budget_ms` has been reduced by the time consumed up to the
    /// firing. On `None`, the whole budget has been spent.
    pub fn pop_due(&mut self, budget_ms: &mut u64) -> Option<Task> {
        let next = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.paused)
            .min_by_key(|(i, t)| (t.remaining_ms, *i))
            .map(|(i, t)| (i, t.remaining_ms));

        match next {
            Some((i, wait)) if wait <= *budget_ms => {
                self.elapse(wait);
                *budget_ms -= wait;
                let timer = &mut self.timers[i];
                let task = timer.task;
                if timer.repeating {
                    timer.remaining_ms = timer.interval_ms;
                } else {
                    self.timers.remove(i);
                }
                Some(task)
            }
            _ => {
                self.elapse(*budget_ms);
                *budget_ms = 0;
                None
            }
        }
    }
}

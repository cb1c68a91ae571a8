use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::game::Game;
use crate::input::GameKey;
use crate::playfield::Playfield;

/// Keys handled in a single frame at most; the rest wait for the next one
pub const MAX_KEYS_PER_FRAME: usize = 64;

/// Anything that feeds key presses to the session
pub trait KeySource {
    /// Called once per frame before any key is requested
    fn begin_frame(&mut self, _dt_ms: u64) {}

    /// Next key for this frame, or `None` once the frame's input is drained
    fn next_key<P: Playfield + ?Sized>(&mut self, game: &Game, field: &P) -> Option<KeyEvent>;
}

/// Keys pushed from another thread, e.g. a terminal reader
pub struct ChannelKeys {
    rx: Receiver<KeyEvent>,
    disconnected: bool,
}

impl ChannelKeys {
    pub fn new(rx: Receiver<KeyEvent>) -> Self {
        Self {
            rx,
            disconnected: false,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl KeySource for ChannelKeys {
    fn next_key<P: Playfield + ?Sized>(&mut self, _game: &Game, _field: &P) -> Option<KeyEvent> {
        match self.rx.try_recv() {
            Ok(key) => Some(key),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    log::debug!("key channel closed");
                }
                self.disconnected = true;
                None
            }
        }
    }
}

/// Configurable ticker interface
pub trait Ticker {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub keys: usize,
    pub escaped: usize,
}

/// Drives the session one fixed-length frame at a time
pub struct Runner<T: Ticker> {
    ticker: T,
    frames: u64,
}

impl<T: Ticker> Runner<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker, frames: 0 }
    }

    pub fn frame_ms(&self) -> u64 {
        (self.ticker.interval().as_millis() as u64).max(1)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One frame: input, then physics, then timers, then the escape check
    pub fn frame<P, K>(&mut self, game: &mut Game, field: &mut P, keys: &mut K) -> FrameReport
    where
        P: Playfield + ?Sized,
        K: KeySource,
    {
        let dt = self.frame_ms();
        let mut report = FrameReport::default();

        keys.begin_frame(dt);
        while report.keys < MAX_KEYS_PER_FRAME {
            let Some(key) = keys.next_key(&*game, &*field) else {
                break;
            };
            game.handle_key(GameKey::from(key), field);
            report.keys += 1;
        }

        field.advance(dt);
        game.advance(dt, field);
        report.escaped = game.check_boundary(field);

        self.frames += 1;
        report
    }

    /// Run frames until the session ends or `limit_ms` of frame time has passed.
    /// Returns the frame time spent.
    pub fn run<P, K>(&mut self, game: &mut Game, field: &mut P, keys: &mut K, limit_ms: u64) -> u64
    where
        P: Playfield + ?Sized,
        K: KeySource,
    {
        let dt = self.frame_ms();
        let mut spent = 0;
        while spent < limit_ms && !game.is_game_over() {
            self.frame(game, field, keys);
            spent = spent.saturating_add(dt);
        }
        spent
    }
}

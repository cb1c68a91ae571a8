// Library surface for the soak binary and the integration tests.
pub mod autoplay;
pub mod config;
pub mod enemy;
pub mod error;
pub mod game;
pub mod input;
pub mod playfield;
pub mod power_up;
pub mod runtime;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod soak;
pub mod spawner;
pub mod time_series;
pub mod util;
pub mod words;

pub use error::GameError;
pub use game::{Game, MatchOutcome};

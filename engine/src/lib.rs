//! SnakeEscape engine: the pure game state machine plus the async session
//! driver and persistence plumbing. No rendering code lives here; frontends
//! consume [`game::GameSnapshot`] values and feed [`session::SessionCommand`]s.

pub mod config;
pub mod game;
pub mod highscore;
pub mod logger;
pub mod session;

pub use game::{Command, Direction, GameSnapshot, GameState, Phase, Point};
pub use session::{SessionCommand, SnapshotSink, run_session};

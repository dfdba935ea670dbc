mod overlay;
mod session_rng;
mod settings;
mod snake;
mod snapshot;
mod state;
mod types;

pub use overlay::{OverlayButton, OverlayRect, OverlayScreen, overlay_screen};
pub use session_rng::SessionRng;
pub use settings::{GameSettings, INITIAL_SNAKE_LENGTH, SCORE_PER_FOOD, speed_label};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
pub use state::{GameState, TickOutcome};
pub use types::{Command, DeathReason, Direction, Phase, Point};

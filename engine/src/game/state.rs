use crate::log;

use super::session_rng::SessionRng;
use super::settings::{GameSettings, SCORE_PER_FOOD};
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::types::{Command, DeathReason, Direction, Phase, Point};

/// Result of a single tick, consumed by the session driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Phase was not Playing; nothing happened.
    Idle,
    Moved {
        ate_food: bool,
    },
    /// Collision this tick. `new_high_score` is set iff the final score beat
    /// the previous high score, and is reported exactly once.
    GameOver {
        new_high_score: Option<u32>,
    },
}

pub struct GameState {
    settings: GameSettings,
    phase: Phase,
    snake: Snake,
    food: Point,
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    high_score: u32,
    death_reason: Option<DeathReason>,
}

impl GameState {
    pub fn new(settings: GameSettings, high_score: u32, rng: &mut SessionRng) -> Self {
        let center = settings.grid_size as i32 / 2;
        let snake = Snake::spawn(Point::new(center, center), Direction::Right);
        let mut state = Self {
            settings,
            phase: Phase::Start,
            snake,
            food: Point::new(0, 0),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score,
            death_reason: None,
        };
        state.place_food(rng);
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Single phase-transition table. Returns the new phase when the command
    /// applies; any other (phase, command) pair is dropped.
    pub fn handle_command(&mut self, command: Command, rng: &mut SessionRng) -> Option<Phase> {
        let new_phase = match (self.phase, command) {
            (Phase::Start, Command::Begin) => {
                self.reset(rng);
                Phase::Playing
            }
            (Phase::Playing, Command::Pause) => Phase::Paused,
            (Phase::Paused, Command::Resume) => Phase::Playing,
            (Phase::Paused | Phase::GameOver, Command::Restart) => {
                self.reset(rng);
                Phase::Playing
            }
            (Phase::GameOver, Command::ReturnToMenu) => Phase::Start,
            _ => return None,
        };

        self.phase = new_phase;
        Some(new_phase)
    }

    /// Buffer a direction request. Rejected iff it reverses the committed
    /// direction; the latest accepted request wins. Stored in any phase, but
    /// only a Playing tick will commit it.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.direction) {
            self.pending_direction = direction;
        }
    }

    /// Advance the game by one cell. Only Playing ticks do anything.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }

        self.direction = self.pending_direction;

        let head = self.snake.head();
        let (dx, dy) = self.direction.offset();
        let candidate = Point::new(head.x + dx, head.y + dy);

        if let Some(reason) = self.check_collision(candidate) {
            self.death_reason = Some(reason);
            self.phase = Phase::GameOver;
            log!("Game over: {:?} at ({}, {})", reason, candidate.x, candidate.y);

            let new_high_score = if self.score > self.high_score {
                self.high_score = self.score;
                Some(self.score)
            } else {
                None
            };
            return TickOutcome::GameOver { new_high_score };
        }

        let ate_food = candidate == self.food;
        self.snake.advance(candidate, ate_food);

        if ate_food {
            self.score += SCORE_PER_FOOD;
            log!(
                "Ate food at ({}, {}). Score: {}",
                candidate.x,
                candidate.y,
                self.score
            );
            self.place_food(rng);
        }

        TickOutcome::Moved { ate_food }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            death_reason: self.death_reason,
            grid_size: self.settings.grid_size,
        }
    }

    fn reset(&mut self, rng: &mut SessionRng) {
        let center = self.settings.grid_size as i32 / 2;
        self.snake = Snake::spawn(Point::new(center, center), Direction::Right);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.death_reason = None;
        self.place_food(rng);
    }

    /// Wall check, then the pre-move body from index 1 on. The candidate can
    /// never equal the current head (it is head + a unit offset), so the full
    /// occupancy set encodes exactly that scan. The soon-to-vacate tail is
    /// included on purpose; moving onto the tail cell ends the game.
    fn check_collision(&self, candidate: Point) -> Option<DeathReason> {
        let grid = self.settings.grid_size as i32;
        if candidate.x < 0 || candidate.x >= grid || candidate.y < 0 || candidate.y >= grid {
            return Some(DeathReason::WallCollision);
        }
        if self.snake.occupies(candidate) {
            return Some(DeathReason::SelfCollision);
        }
        None
    }

    /// Rejection sampling over the whole grid until a free cell comes up.
    /// Terminates almost surely: the snake covers far fewer than grid² cells.
    fn place_food(&mut self, rng: &mut SessionRng) {
        let grid = self.settings.grid_size as i32;
        loop {
            let candidate = Point::new(rng.random_range(0..grid), rng.random_range(0..grid));
            if !self.snake.occupies(candidate) {
                self.food = candidate;
                return;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: Vec<Point>) {
        self.snake = Snake::from_segments(segments);
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Point {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> Vec<Point> {
        self.snake.segments().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> (GameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(GameSettings::default(), 0, &mut rng);
        state.handle_command(Command::Begin, &mut rng);
        (state, rng)
    }

    fn park_food(state: &mut GameState) {
        // Keep food out of the snake's path for movement-only tests.
        state.set_food(Point::new(0, 19));
    }

    #[test]
    fn test_begin_resets_to_centered_snake_facing_right() {
        let (state, _) = playing_state();
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(
            state.body(),
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_tick_moves_head_right_without_growth() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::Moved { ate_food: false });
        assert_eq!(
            state.body(),
            vec![Point::new(11, 10), Point::new(10, 10), Point::new(9, 10)]
        );
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_pending_direction_commits_on_tick() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);

        state.request_direction(Direction::Up);
        state.tick(&mut rng);

        assert_eq!(state.body()[0], Point::new(10, 9));
        // Up is now the committed direction, so Down must be rejected.
        state.request_direction(Direction::Down);
        state.tick(&mut rng);
        assert_eq!(state.body()[0], Point::new(10, 8));
    }

    #[test]
    fn test_reversal_request_is_dropped() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);

        state.request_direction(Direction::Left);
        state.tick(&mut rng);

        // Committed direction stayed Right; the snake kept moving right.
        assert_eq!(state.body()[0], Point::new(11, 10));
    }

    #[test]
    fn test_latest_accepted_request_wins() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);

        // Both Up and Down are legal against the committed Right; the buffer
        // keeps only the last one.
        state.request_direction(Direction::Up);
        state.request_direction(Direction::Down);
        state.tick(&mut rng);

        assert_eq!(state.body()[0], Point::new(10, 11));
    }

    #[test]
    fn test_eating_food_grows_scores_and_respawns_food() {
        let (mut state, mut rng) = playing_state();
        state.set_food(Point::new(11, 10));

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::Moved { ate_food: true });
        assert_eq!(state.body().len(), 4);
        assert_eq!(state.score(), SCORE_PER_FOOD);
        assert_ne!(state.food(), Point::new(11, 10));
        for segment in state.body() {
            assert_ne!(state.food(), segment);
        }
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        state.set_snake(vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)]);

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::GameOver { new_high_score: None });
        assert_eq!(state.phase(), Phase::GameOver);
        // Body is untouched by the terminal tick.
        assert_eq!(state.body()[0], Point::new(19, 10));
    }

    #[test]
    fn test_self_collision_ends_game() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        // Head at (5,5) moving right into its own body at (6,5).
        state.set_snake(vec![
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
            Point::new(7, 5),
        ]);

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::GameOver { new_high_score: None });
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_moving_onto_tail_cell_is_game_over() {
        // The pre-move body check includes the tail even though the tail
        // would vacate this tick. Preserved from the original rules; see
        // DESIGN.md before "fixing".
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        // 2x2 loop: head (5,5) going up into the tail cell (5,4).
        state.set_snake(vec![
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 4),
            Point::new(5, 4),
        ]);
        state.request_direction(Direction::Up);

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::GameOver { new_high_score: None });
    }

    #[test]
    fn test_high_score_committed_once_when_beaten() {
        let (mut state, mut rng) = playing_state();
        // Earn a score by eating once at a forced food position.
        state.set_snake(vec![Point::new(18, 10), Point::new(17, 10), Point::new(16, 10)]);
        state.set_food(Point::new(19, 10));
        state.tick(&mut rng);
        assert_eq!(state.score(), 10);

        park_food(&mut state);
        state.set_snake(vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)]);
        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::GameOver { new_high_score: Some(10) });
        assert_eq!(state.high_score(), 10);
    }

    #[test]
    fn test_high_score_not_committed_when_not_beaten() {
        let mut rng = SessionRng::new(7);
        let mut state = GameState::new(GameSettings::default(), 100, &mut rng);
        state.handle_command(Command::Begin, &mut rng);
        park_food(&mut state);
        state.set_snake(vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)]);

        let outcome = state.tick(&mut rng);

        assert_eq!(outcome, TickOutcome::GameOver { new_high_score: None });
        assert_eq!(state.high_score(), 100);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(GameSettings::default(), 0, &mut rng);
        assert_eq!(state.tick(&mut rng), TickOutcome::Idle);

        state.handle_command(Command::Begin, &mut rng);
        state.handle_command(Command::Pause, &mut rng);
        let body_before = state.body();
        assert_eq!(state.tick(&mut rng), TickOutcome::Idle);
        assert_eq!(state.body(), body_before);
    }

    #[test]
    fn test_pause_and_resume_preserve_state() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        state.tick(&mut rng);
        let body = state.body();
        let food = state.food();

        assert_eq!(state.handle_command(Command::Pause, &mut rng), Some(Phase::Paused));
        assert_eq!(state.handle_command(Command::Resume, &mut rng), Some(Phase::Playing));
        assert_eq!(state.body(), body);
        assert_eq!(state.food(), food);
    }

    #[test]
    fn test_restart_resets_from_paused_and_game_over() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        state.tick(&mut rng);
        state.handle_command(Command::Pause, &mut rng);

        assert_eq!(state.handle_command(Command::Restart, &mut rng), Some(Phase::Playing));
        assert_eq!(state.body()[0], Point::new(10, 10));

        state.set_snake(vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)]);
        state.tick(&mut rng);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.handle_command(Command::Restart, &mut rng), Some(Phase::Playing));
        assert_eq!(state.body()[0], Point::new(10, 10));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_return_to_menu_changes_phase_only() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        state.set_snake(vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)]);
        state.tick(&mut rng);
        let body = state.body();

        assert_eq!(
            state.handle_command(Command::ReturnToMenu, &mut rng),
            Some(Phase::Start)
        );
        assert_eq!(state.body(), body);
    }

    #[test]
    fn test_repeated_direction_request_applies_after_restart() {
        // The same key the player last pressed in the previous game must
        // still turn the new snake: restart resets the committed direction
        // to Right, and nothing upstream may filter the repeat.
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);

        state.request_direction(Direction::Up);
        state.tick(&mut rng);
        assert_eq!(state.body()[0], Point::new(10, 9));

        state.set_snake(vec![Point::new(10, 0), Point::new(10, 1), Point::new(10, 2)]);
        state.tick(&mut rng);
        assert_eq!(state.phase(), Phase::GameOver);

        state.handle_command(Command::Restart, &mut rng);
        park_food(&mut state);
        state.request_direction(Direction::Up);
        state.tick(&mut rng);
        assert_eq!(state.body()[0], Point::new(10, 9));
    }

    #[test]
    fn test_invalid_commands_are_dropped() {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(GameSettings::default(), 0, &mut rng);

        assert_eq!(state.handle_command(Command::Pause, &mut rng), None);
        assert_eq!(state.handle_command(Command::Resume, &mut rng), None);
        assert_eq!(state.handle_command(Command::Restart, &mut rng), None);
        assert_eq!(state.phase(), Phase::Start);

        state.handle_command(Command::Begin, &mut rng);
        assert_eq!(state.handle_command(Command::Begin, &mut rng), None);
        assert_eq!(state.handle_command(Command::ReturnToMenu, &mut rng), None);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_length_and_food_invariants_over_long_run() {
        // Drive the snake in a safe cycle for many ticks; length only ever
        // changes by eating, food never lands on the body, and the score
        // stays a multiple of 10.
        let mut rng = SessionRng::new(1234);
        let mut state = GameState::new(GameSettings::default(), 0, &mut rng);
        state.handle_command(Command::Begin, &mut rng);

        let mut len_before = state.body().len();
        for turn in 0.. {
            if state.phase() != Phase::Playing || turn > 2000 {
                break;
            }

            // Steer clockwise around the perimeter; never collides.
            let head = state.body()[0];
            if head.x == 19 && head.y < 19 {
                state.request_direction(Direction::Down);
            } else if head.y == 19 && head.x > 0 {
                state.request_direction(Direction::Left);
            } else if head.x == 0 && head.y > 0 {
                state.request_direction(Direction::Up);
            } else if head.y == 0 && head.x < 19 {
                state.request_direction(Direction::Right);
            }

            match state.tick(&mut rng) {
                TickOutcome::Moved { ate_food } => {
                    let len_after = state.body().len();
                    if ate_food {
                        assert_eq!(len_after, len_before + 1);
                    } else {
                        assert_eq!(len_after, len_before);
                    }
                    len_before = len_after;

                    assert_eq!(state.score() % 10, 0);
                    for segment in state.body() {
                        assert_ne!(state.food(), segment);
                    }
                }
                TickOutcome::GameOver { .. } => break,
                TickOutcome::Idle => unreachable!(),
            }
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut state, mut rng) = playing_state();
        park_food(&mut state);
        state.tick(&mut rng);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.snake, state.body());
        assert_eq!(snapshot.food, state.food());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.grid_size, 20);
        assert!(snapshot.death_reason.is_none());
    }
}

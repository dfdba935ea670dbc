use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::config::ConfigContentProvider;
use crate::game::{
    Command, Direction, GameSnapshot, GameState, Phase, SessionRng, TickOutcome, speed_label,
};
use crate::highscore::HighScoreStore;
use crate::log;

/// Everything the outside world can ask of a running session.
#[derive(Clone, Copy, Debug)]
pub enum SessionCommand {
    Game(Command),
    Turn(Direction),
    SetSpeed(u32),
    Shutdown,
}

/// Where published snapshots go. Frontends implement this to receive the
/// state after every tick and every phase change.
pub trait SnapshotSink: Send + Sync + Clone + 'static {
    fn publish(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

const MIN_TICK_INTERVAL_MS: u32 = 50;
const MAX_TICK_INTERVAL_MS: u32 = 500;

/// Session event loop. Owns the game state outright: ticks and commands are
/// dispatched one at a time from a single task, so no handler ever observes
/// another mid-mutation. The ticker arm is gated on Playing and the interval
/// is replaced whenever play (re)starts or the speed changes, so a stale
/// deadline can never fire early or twice.
pub async fn run_session<TSink, TProvider>(
    mut state: GameState,
    store: HighScoreStore<TProvider>,
    sink: TSink,
    mut commands: UnboundedReceiver<SessionCommand>,
    mut rng: SessionRng,
) where
    TSink: SnapshotSink,
    TProvider: ConfigContentProvider + Send,
{
    let mut tick_interval = state.settings().tick_interval();
    let mut ticker = new_ticker(tick_interval);

    log!(
        "Session started (seed {}, tick interval {} ms)",
        rng.seed(),
        tick_interval.as_millis()
    );
    sink.publish(state.snapshot()).await;

    loop {
        tokio::select! {
            _ = ticker.tick(), if state.phase() == Phase::Playing => {
                let outcome = state.tick(&mut rng);

                if let TickOutcome::GameOver { new_high_score } = outcome
                    && let Some(value) = new_high_score
                {
                    match store.save(value) {
                        Ok(()) => log!("New high score saved: {}", value),
                        Err(e) => log!("Failed to persist high score: {}", e),
                    }
                }

                sink.publish(state.snapshot()).await;
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };

                match command {
                    SessionCommand::Turn(direction) => {
                        state.request_direction(direction);
                    }
                    SessionCommand::Game(game_command) => {
                        if let Some(new_phase) = state.handle_command(game_command, &mut rng) {
                            if new_phase == Phase::Playing {
                                ticker = new_ticker(tick_interval);
                            }
                            log!("Phase changed to {:?}", new_phase);
                            sink.publish(state.snapshot()).await;
                        }
                    }
                    SessionCommand::SetSpeed(interval_ms) => {
                        let interval_ms =
                            interval_ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
                        tick_interval = Duration::from_millis(interval_ms as u64);
                        log!("Speed set to {} ms ({})", interval_ms, speed_label(interval_ms));
                        if state.phase() == Phase::Playing {
                            ticker = new_ticker(tick_interval);
                        }
                    }
                    SessionCommand::Shutdown => break,
                }
            }
        }
    }

    log!("Session finished");
}

/// First deadline a full period out, so (re)starting play never produces an
/// immediate tick.
fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

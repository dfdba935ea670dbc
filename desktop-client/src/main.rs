mod app;
mod sink;
mod state;

use clap::Parser;
use eframe::egui;
use tokio::sync::mpsc;

use engine::config::ConfigStore;
use engine::game::{GameSettings, GameState, SessionRng};
use engine::highscore::HighScoreStore;
use engine::log;
use engine::session::run_session;

use app::SnakeApp;
use sink::LocalSnapshotSink;
use state::SharedState;

#[derive(Parser)]
#[command(name = "snake_escape", about = "SnakeEscape desktop client")]
struct Args {
    /// Path to the YAML settings file.
    #[arg(long, default_value = "snake_escape_config.yaml")]
    config: String,

    /// Fixed RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    engine::logger::init_logger(None);

    let settings: GameSettings = ConfigStore::from_yaml_file(&args.config).load()?;
    log!(
        "Loaded settings: grid {}x{}, tick interval {} ms",
        settings.grid_size,
        settings.grid_size,
        settings.tick_interval_ms
    );

    let store = HighScoreStore::at_default_path();
    let high_score = store.load();
    log!("High score: {}", high_score);

    let mut rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let game_state = GameState::new(settings.clone(), high_score, &mut rng);

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let sink = LocalSnapshotSink::new(shared_state.clone());

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(run_session(game_state, store, sink, command_rx, rng));
    });

    let canvas = settings.grid_size as f32 * app::CELL_SIZE;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas + 20.0, canvas + 110.0])
            .with_resizable(false)
            .with_title("SnakeEscape"),
        ..Default::default()
    };

    eframe::run_native(
        "SnakeEscape",
        options,
        Box::new(|_cc| {
            Ok(Box::new(SnakeApp::new(
                shared_state,
                command_tx,
                settings.tick_interval_ms,
            )))
        }),
    )?;

    Ok(())
}

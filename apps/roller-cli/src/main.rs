mod script;

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use roller_game::{GameConfig, GameSession, SharedScoreText};
use roller_input::{Action, HorizontalSource, ScriptedInput};
use roller_kernel::RayHit;
use roller_persist::{FileSettings, HighScore, MemorySettings, SettingsStore};
use tracing_subscriber::EnvFilter;

use crate::script::{SCRIPT_FPS, SplitMix64, demo_script};

#[derive(Parser)]
#[command(name = "roller-cli", about = "Headless endless roller runs and high score tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding settings.json
    #[arg(long, default_value = "./roller_data")]
    data_dir: PathBuf,

    /// YAML game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a level headlessly with generated input
    Run {
        /// Seconds of play to simulate
        #[arg(short = 't', long, default_value = "30")]
        seconds: f32,
        /// Steering source (axis, pointer, accelerometer, screen_touch, joystick)
        #[arg(long)]
        source: Option<HorizontalSource>,
        /// Seed for the generated input and level
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of obstacle rows placed ahead of the player
        #[arg(long, default_value = "20")]
        rows: usize,
    },
    /// Show or reset the persisted high score
    HighScore {
        #[command(subcommand)]
        action: HighScoreAction,
    },
    /// Print the effective configuration as YAML
    Config,
}

#[derive(Subcommand)]
enum HighScoreAction {
    Show,
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Run {
            seconds,
            source,
            seed,
            rows,
        } => run(config, &cli.data_dir, seconds, source, seed, rows)?,
        Commands::HighScore { action } => {
            let store = FileSettings::open_in(&cli.data_dir)
                .with_context(|| format!("opening settings in {}", cli.data_dir.display()))?;
            let mut high_score = HighScore::load(store);
            if let HighScoreAction::Reset = action {
                high_score.reset();
            }
            println!("high score: {}", high_score.best());
        }
        Commands::Config => print!("{}", config.to_yaml_string()?),
    }

    Ok(())
}

fn run(
    mut config: GameConfig,
    data_dir: &Path,
    seconds: f32,
    source: Option<HorizontalSource>,
    seed: u64,
    rows: usize,
) -> anyhow::Result<()> {
    if let Some(source) = source {
        config.input.source = source;
    }
    println!(
        "Headless run: seconds={seconds}, source={}, seed={seed}",
        config.input.source
    );

    // Play never stops over storage: fall back to memory.
    let store: Box<dyn SettingsStore> = match FileSettings::open_in(data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "settings unavailable, high score will not persist");
            Box::new(MemorySettings::new())
        }
    };

    let frames = demo_script(seconds, seed, &config.screen);
    let frame_count = frames.len();
    let mut session = GameSession::with_world(config, Box::new(ScriptedInput::new(frames)), store)?;

    let taps = Rc::new(Cell::new(0u32));
    let mut rng = SplitMix64(seed ^ 0x5eed);
    let lane = session.config().player.swipe_move;
    for row in 0..rows {
        let x = lane * (rng.next_u64() % 3) as f32 - lane;
        let z = 25.0 + row as f32 * 20.0;
        let id = session
            .physics_mut()
            .spawn_obstacle(Vec3::new(x, 0.0, z), Vec3::new(0.5, 0.5, 0.5));
        let seen = Rc::clone(&taps);
        session
            .targets_mut()
            .register(id, move |_: &RayHit| seen.set(seen.get() + 1));
    }

    let text = SharedScoreText::new();
    session.set_score_display(text.clone());

    let dt = 1.0 / SCRIPT_FPS;
    let mut swipes = 0;
    let mut pinches = 0;
    for _ in 0..frame_count {
        let report = session.frame(dt);
        for action in &report.actions {
            match action {
                Action::Swipe(_) => swipes += 1,
                Action::Pinch(_) => pinches += 1,
                _ => {}
            }
        }
    }

    println!("{}", session.summary());
    println!("Display: {}", text.text());
    println!("Swipes: {swipes}, pinch frames: {pinches}, obstacles tapped: {}", taps.get());
    println!("Obstacles: {}", session.physics().body_count() - 1);
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chesspilot::bot::engine::UciEngine;
use chesspilot::bot::{events, BotEvent, BotRunner};
use chesspilot::browser::BrowserMoveList;
use chesspilot::core::{Calibration, RunConfig};
use chesspilot::input::SystemPointer;

const DEFAULT_GAME_URL: &str = "https://www.chess.com/play/computer";

/// Number of played moves kept in the console history line.
const HISTORY_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "chesspilot",
    about = "Watches a web chess board and answers with an external UCI engine"
)]
struct Cli {
    /// Side the bot plays
    #[arg(long, value_enum, default_value = "white")]
    play: Side,

    /// Polling delay in seconds
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=10))]
    delay: u64,

    /// Print advisory moves without clicking them
    #[arg(long)]
    no_auto_play: bool,

    /// Engine search budget per move, in milliseconds
    #[arg(long, default_value_t = 100)]
    movetime: u64,

    /// Path to a UCI engine binary
    #[arg(long, default_value = "stockfish")]
    engine: PathBuf,

    /// WebDriver endpoint to attach to
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver: String,

    /// Game page to watch
    #[arg(long, default_value = DEFAULT_GAME_URL)]
    url: String,

    /// Record a new calibration and exit: screen position of the board's
    /// top-left corner, as "x,y"
    #[arg(long, value_parser = parse_point, requires = "bottom_right")]
    top_left: Option<(f64, f64)>,

    /// Screen position of the board's bottom-right corner, as "x,y"
    #[arg(long, value_parser = parse_point, requires = "top_left")]
    bottom_right: Option<(f64, f64)>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    White,
    Black,
}

fn parse_point(raw: &str) -> Result<(f64, f64), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", raw))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let (Some(top_left), Some(bottom_right)) = (cli.top_left, cli.bottom_right) {
        let calibration = Calibration::from_corners(top_left, bottom_right);
        calibration
            .save()
            .context("failed to persist calibration")?;
        println!(
            "Calibration saved: origin ({}, {}), square {}x{}",
            calibration.x0, calibration.y0, calibration.square_width, calibration.square_height
        );
        return Ok(());
    }

    let Some(calibration) = Calibration::load() else {
        bail!("no calibration on record; run once with --top-left and --bottom-right");
    };

    let mut config = RunConfig::new(
        matches!(cli.play, Side::White),
        Duration::from_secs(cli.delay),
        !cli.no_auto_play,
    );
    config.move_time = Duration::from_millis(cli.movetime);

    // A session that cannot be established is fatal: the loop never starts.
    let engine = UciEngine::spawn(&cli.engine)
        .await
        .context("engine session could not be established")?;
    let source = BrowserMoveList::connect(&cli.webdriver, &cli.url)
        .await
        .context("browser session could not be established")?;
    let pointer = SystemPointer::new().context("pointer device unavailable")?;

    let (events_tx, mut events_rx) = events::channel();
    let runner = BotRunner::new(config, calibration, source, engine, pointer, events_tx);
    let stop = runner.stop_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("[MAIN] Stop requested");
            stop.stop();
        }
    });

    let presenter = tokio::spawn(async move {
        let mut history: Vec<String> = Vec::new();
        let mut last_status = String::new();
        while let Some(event) = events_rx.recv().await {
            match event {
                BotEvent::StatusChanged(text) => {
                    if text != last_status {
                        println!("[status] {}", text);
                        last_status = text;
                    }
                }
                BotEvent::AdvisoryMove(san) => {
                    println!("[advice] Suggested move: {}", san);
                }
                BotEvent::MovePlayed { san, by_white } => {
                    history.push(format!(
                        "{}: {}",
                        if by_white { "White" } else { "Black" },
                        san
                    ));
                    if history.len() > HISTORY_LIMIT {
                        history.remove(0);
                    }
                    println!("[history] {}", history.join(" | "));
                }
            }
        }
    });

    runner.run().await;
    let _ = presenter.await;
    Ok(())
}

//! LapTrack - RC car lap timing
//!
//! Command line entry point. Replays a recorded detection session through
//! the race core and prints the final standings.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use laptrack::detection::ReplayReader;
use laptrack::racing::Point;
use laptrack::storage::config::{get_config_path, load_config_from};
use laptrack::ui::controls_help;
use laptrack::RaceSession;

#[derive(Parser, Debug)]
#[command(version, about = "RC car lap timer")]
struct Args {
    /// Recorded detection session (JSON lines)
    #[arg(long, short = 'r')]
    replay: Option<PathBuf>,

    /// Configuration file (default: platform data directory)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Detector confidence threshold (0-1)
    #[arg(long)]
    conf: Option<f32>,

    /// Directory for exported lap CSVs
    #[arg(long, short = 'o')]
    export_dir: Option<PathBuf>,

    /// Finish line as x1,y1,x2,y2 (otherwise set by click events)
    #[arg(long, value_parser = parse_line)]
    line: Option<(Point, Point)>,

    /// Export lap CSVs when the session ends
    #[arg(long)]
    export_on_exit: bool,
}

fn parse_line(s: &str) -> Result<(Point, Point), String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate: {}", e))?;

    match values.as_slice() {
        [x1, y1, x2, y2] => Ok((Point::new(*x1, *y1), Point::new(*x2, *y2))),
        _ => Err("expected four comma-separated integers".to_string()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LapTrack v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(get_config_path);
    let mut config = load_config_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    if let Some(conf) = args.conf {
        config.model.confidence_threshold = conf;
    }
    if let Some(dir) = args.export_dir {
        config.export.directory = dir;
    }
    if let Some(path) = args.replay {
        config.input.replay_path = Some(path);
    }
    config.validate()?;

    let Some(replay_path) = config.input.replay_path.clone() else {
        bail!("no detection source: pass --replay <session.jsonl>");
    };

    let mut session = RaceSession::from_config(&config)?;
    if let Some((p1, p2)) = args.line {
        session.race_mut().set_finish_line_point1(p1);
        session.race_mut().set_finish_line_point2(p2);
    }

    tracing::info!(
        "Controls: {}",
        controls_help(session.keyboard(), config.race.penalty_seconds)
    );

    let mut reader = ReplayReader::open(&replay_path)
        .with_context(|| format!("opening {}", replay_path.display()))?;
    session.run(&mut reader)?;

    if !session.race().finish_line().is_ready() {
        tracing::warn!("Finish line was never set; no laps could be timed");
    }

    for line in session.hud_lines() {
        println!("{}", line);
    }

    if args.export_on_exit {
        let written = session.export()?;
        tracing::info!("Exported {} file(s)", written.len());
    }

    Ok(())
}

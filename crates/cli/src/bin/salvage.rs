use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::warn;
use orbital_salvage_planner::config::load_engine_config;
use orbital_salvage_planner::engine::{Engine, EngineError, WorldFrame};
use orbital_salvage_planner::export::{
    FrameRecord, RunSummary, write_frames_csv, write_summary_json,
};

#[derive(Parser)]
#[command(author, version, about = "Relativistic salvage-run planner")]
struct Cli {
    /// Run mode
    #[arg(long, value_enum, default_value_t = Mode::Sim)]
    mode: Mode,

    /// World description file (YAML or TOML)
    #[arg(long)]
    world: PathBuf,

    /// Round tag carried into exported file names
    #[arg(long, default_value_t = 0)]
    round: u32,

    /// Free-form keyword tags, forwarded to the run summary file name
    #[arg(long)]
    keywords: Option<String>,

    /// Request the graphics front-end (not built into this binary)
    #[arg(long, default_value_t = false)]
    graphics: bool,

    /// Output directory for `final` mode exports
    #[arg(long, default_value = "data/runs")]
    output: PathBuf,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Mode {
    /// Validate the world file and report entity counts.
    Test,
    /// Compute a plan and stream frames to stdout.
    Sim,
    /// Compute a plan and export frames as CSV plus a JSON summary.
    Final,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.graphics {
        warn!("graphics front-end is not part of this binary; flag ignored");
    }

    let config = load_engine_config(&cli.world)?;
    let mut engine = Engine::initialize(config)?;

    match cli.mode {
        Mode::Test => {
            println!("world '{}' is valid", cli.world.display());
            Ok(())
        }
        Mode::Sim => {
            engine.compute()?;
            for frame in drain_frames(&mut engine)? {
                print_frame(&frame);
            }
            Ok(())
        }
        Mode::Final => {
            engine.compute()?;
            let frames = drain_frames(&mut engine)?;
            let records: Vec<FrameRecord> = frames
                .iter()
                .enumerate()
                .map(|(step, frame)| FrameRecord {
                    step,
                    global_time: frame.global_time,
                    proper_time: frame.ship.proper_time,
                    x: frame.ship.position[0],
                    y: frame.ship.position[1],
                    vx: frame.ship.velocity[0],
                    vy: frame.ship.velocity[1],
                    fuel: frame.ship.fuel,
                    collected_count: frame.ship.collected.len(),
                })
                .collect();

            let collected = frames
                .last()
                .map(|frame| frame.ship.collected.clone())
                .unwrap_or_default();
            let summary = RunSummary::new(
                frames.len(),
                engine
                    .result()
                    .map(|result| result.total_cost)
                    .unwrap_or_default(),
                collected,
            );

            let stem = run_stem(cli.round, cli.keywords.as_deref());
            let csv_path = cli.output.join(format!("{stem}_frames.csv"));
            let json_path = cli.output.join(format!("{stem}_summary.json"));
            write_frames_csv(&csv_path, &records)?;
            write_summary_json(&json_path, &summary)?;
            println!(
                "exported {} frames to {} (summary: {})",
                records.len(),
                csv_path.display(),
                json_path.display()
            );
            Ok(())
        }
    }
}

fn drain_frames(engine: &mut Engine) -> anyhow::Result<Vec<WorldFrame>> {
    let mut frames = Vec::new();
    loop {
        match engine.step() {
            Ok(frame) => frames.push(frame),
            Err(EngineError::SimulationCompleted) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(frames)
}

fn print_frame(frame: &WorldFrame) {
    println!(
        "t={:>10.3}  pos=({:>10.3}, {:>10.3})  vel=({:>8.3}, {:>8.3})  fuel={:>8.3}  collected={}",
        frame.global_time,
        frame.ship.position[0],
        frame.ship.position[1],
        frame.ship.velocity[0],
        frame.ship.velocity[1],
        frame.ship.fuel,
        frame.ship.collected.len()
    );
}

fn run_stem(round: u32, keywords: Option<&str>) -> String {
    match keywords {
        Some(keywords) => {
            let tag: String = keywords
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_lowercase()
                    } else {
                        '_'
                    }
                })
                .collect();
            format!("round{round}_{tag}")
        }
        None => format!("round{round}"),
    }
}

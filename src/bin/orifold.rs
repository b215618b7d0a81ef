//! Console front-end for the orifold reference database.
//!
//! Builds the database, then prints verbal folding sequences for the
//! requested target mark or line, or an accuracy statistics report.
//!
//! ```text
//! orifold mark 0.3 0.7
//! orifold --config paper.yaml --count 3 line 0 0.25 1 0.25
//! orifold stats --trials 2000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;

use orifold::{BuildProgress, Config, Database, Point2D, Signal, StatOptions};

#[derive(Parser)]
#[command(name = "orifold", about = "Find folding sequences for points and lines on paper")]
struct Cli {
    /// YAML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many solutions to print.
    #[arg(long, default_value_t = 5)]
    count: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the best marks for a target point.
    Mark {
        /// Target x coordinate.
        x: f64,
        /// Target y coordinate.
        y: f64,
    },
    /// Find the best lines for the line through two points.
    Line {
        /// First point, x.
        x1: f64,
        /// First point, y.
        y1: f64,
        /// Second point, x.
        x2: f64,
        /// Second point, y.
        y2: f64,
    },
    /// Report accuracy statistics over random trial points.
    Stats {
        /// Number of random trials.
        #[arg(long, default_value_t = 1000)]
        trials: usize,
        /// Seed for the trial generator.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn load_config(cli: &Cli) -> orifold::Result<Config> {
    match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::load(path)
        }
        None => Ok(Config::default()),
    }
}

fn build_database(cfg: Config) -> orifold::Result<Database> {
    Database::build_with_progress(cfg, &mut |progress| {
        match progress {
            BuildProgress::Initializing => info!("initializing database"),
            BuildProgress::Working { rank, lines, marks } => {
                info!("working on rank {}: {} lines, {} marks", rank, lines, marks)
            }
            BuildProgress::RankComplete { rank, lines, marks } => {
                info!("{} lines and {} marks of rank <= {}", lines, marks, rank)
            }
            BuildProgress::Ready { lines, marks } => {
                info!("database ready: {} lines, {} marks", lines, marks)
            }
        }
        Signal::Continue
    })
}

fn run(cli: Cli) -> orifold::Result<()> {
    let cfg = load_config(&cli)?;
    let db = build_database(cfg)?;

    match cli.command {
        Command::Mark { x, y } => {
            let target = Point2D::new(x, y);
            let found = db.find_best_marks(target, cli.count)?;
            if found.is_empty() {
                println!("no match found");
            }
            for id in found {
                println!("{}", db.mark_report(id, target));
            }
        }
        Command::Line { x1, y1, x2, y2 } => {
            let target = db.validate_line_target(Point2D::new(x1, y1), Point2D::new(x2, y2))?;
            let found = db.find_best_lines(&target, cli.count);
            if found.is_empty() {
                println!("no match found");
            }
            for id in found {
                println!("{}", db.line_report(id, &target));
            }
        }
        Command::Stats { trials, seed } => {
            let opts = StatOptions {
                num_trials: trials,
                seed,
                ..StatOptions::default()
            };
            println!("{}", db.calculate_statistics(&opts));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

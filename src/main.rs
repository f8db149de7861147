//! kitchnsink inspector CLI
//!
//! Entry point for the `ks-inspect` command-line tool.

use clap::{Args, Parser, Subcommand};
use ks_inspect::capture::DEFAULT_CAPTURE_PROGRAM;
use ks_inspect::config::{default_config_dir, DEFAULT_SCREENSHOT_DIR};
use ks_inspect::logging::init_logging;
use ks_inspect::{run_inspect, GrimGrabber, InspectOptions, SinkPaths};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ks-inspect")]
#[command(about = "kitchnsink debug view: config extraction and bar screenshots", version)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect current kitchnsink state (config + visual)
    Inspect(InspectArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Take a screenshot of the bar area (default)
    #[arg(long, overrides_with = "no_screenshot")]
    screenshot: bool,

    /// Skip the bar screenshot
    #[arg(long, overrides_with = "screenshot")]
    no_screenshot: bool,

    /// Dump the merged config as JSON
    #[arg(long, overrides_with = "no_dump_json")]
    dump_json: bool,

    /// Do not dump the merged config (default)
    #[arg(long, overrides_with = "dump_json")]
    no_dump_json: bool,

    /// Config directory holding sink.toml (default: ~/.config/kitchnsink)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Directory for bar screenshots (default: ./.screenshots)
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Full-screen capture program, called as `<program> <file>`
    #[arg(long, default_value = DEFAULT_CAPTURE_PROGRAM)]
    capture_program: String,
}

impl InspectArgs {
    /// Capture is on unless `--no-screenshot` was the last word
    fn screenshot(&self) -> bool {
        resolve_toggle(self.screenshot, self.no_screenshot, true)
    }

    /// JSON dump is off unless `--dump-json` was the last word
    fn dump_json(&self) -> bool {
        resolve_toggle(self.dump_json, self.no_dump_json, false)
    }
}

/// `overrides_with` leaves at most one side of a `--x/--no-x` pair set
fn resolve_toggle(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect(args) => {
            let screenshot = args.screenshot();
            let dump_json = args.dump_json();
            let Some(paths) = resolve_paths(args.config_dir, args.screenshot_dir) else {
                eprintln!("Could not determine home directory; pass --config-dir");
                return;
            };

            let options = InspectOptions {
                paths,
                screenshot,
                dump_json,
            };
            run_inspect_cmd(&options, &args.capture_program);
        }
    }
}

fn run_inspect_cmd(options: &InspectOptions, capture_program: &str) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Phase failures are already reported; the exit status stays 0 either way
    if let Err(e) = run_inspect(options, GrimGrabber::new(capture_program), &mut out) {
        tracing::warn!(error = %e, "failed to write inspection output");
    }
}

fn resolve_paths(config_dir: Option<PathBuf>, screenshot_dir: Option<PathBuf>) -> Option<SinkPaths> {
    let config_dir = match config_dir {
        Some(dir) => dir,
        None => default_config_dir(&dirs::home_dir()?),
    };
    let screenshot_dir = screenshot_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT_DIR));

    Some(SinkPaths::new(config_dir, screenshot_dir))
}

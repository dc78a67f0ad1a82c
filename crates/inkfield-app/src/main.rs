//! Main application entry point.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a recorded Inkfield session and print the resulting canvas state.
#[derive(Parser, Debug)]
#[command(name = "inkfield", version, about)]
struct Args {
    /// Engine configuration file (JSON). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the keyboard shortcuts before replaying.
    #[arg(long)]
    shortcuts: bool,

    /// Session file: a JSON array of recorded events.
    #[arg(value_name = "SESSION")]
    session: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting Inkfield");

    if args.shortcuts {
        inkfield_app::ShortcutRegistry::print_all();
    }

    match inkfield_app::run(args.config.as_deref(), &args.session) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

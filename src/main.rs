//! eat-n-split CLI
//!
//! Split bills with friends and keep running balances, in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use eat_n_split::logging::init_logging;
use eat_n_split::report::format_roster;
use eat_n_split::tui::{self, RunConfig};
use eat_n_split::types::{seed_friends, OutputFormat};

#[derive(Parser)]
#[command(name = "eat-n-split")]
#[command(about = "Split bills with friends and track who owes whom")]
#[command(version)]
struct Cli {
    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive bill splitter (default)
    Split {
        /// Start without the sample friends
        #[arg(long)]
        empty: bool,
    },

    /// Print the starting roster and balances (no UI)
    Friends {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command.unwrap_or(Commands::Split { empty: false }) {
        Commands::Split { empty } => cmd_split(empty),
        Commands::Friends { format } => cmd_friends(format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_split(empty: bool) -> Result<(), String> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Err("eat-n-split needs an interactive terminal (TTY).\n\
                    Use `eat-n-split friends` for plain output."
            .to_string());
    }

    let config = RunConfig { empty_roster: empty };
    tui::run(config).map_err(|e| e.to_string())
}

fn cmd_friends(format: OutputFormat) -> Result<(), String> {
    print!("{}", format_roster(&seed_friends(), format));
    Ok(())
}

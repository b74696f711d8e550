//! Contrail CLI: a shell over the flight tracking engine.
//!
//! Three modes:
//! - **Shell mode**: `contrail [flags] COMMAND`: single command, exit
//! - **REPL mode**: `contrail [flags]`: interactive prompt (if stdin is a TTY)
//! - **Pipe mode**: `cat pushes.txt | contrail`: line-by-line from stdin
//!
//! Logging goes to stderr, filtered by `CONTRAIL_LOG` (default `warn`).

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::process;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::build_cli;
use format::{format_error, format_output, OutputMode};
use parse::{matches_to_action, CliAction};
use state::SessionState;

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let state = match SessionState::open(&matches) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let exit_code = if matches.subcommand().is_some() {
        run_shell_mode(&matches, &state, output_mode)
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&state, output_mode);
        0
    } else {
        repl::run_pipe(&state, output_mode)
    };

    // process::exit skips destructors, so checkpoint explicitly.
    if let Err(e) = state.close() {
        eprintln!("(error) {}", e);
        process::exit(1);
    }
    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CONTRAIL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_shell_mode(matches: &clap::ArgMatches, state: &SessionState, mode: OutputMode) -> i32 {
    match matches_to_action(matches) {
        Ok(CliAction::Execute(cmd)) => match state.execute(cmd) {
            Ok(output) => {
                println!("{}", format_output(&output, mode));
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                1
            }
        },
        Ok(CliAction::Meta(_)) => {
            eprintln!("(error) Meta-commands are only available in REPL mode");
            1
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}

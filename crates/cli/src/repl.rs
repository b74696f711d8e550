//! REPL and pipe modes.
//!
//! Both read one command per line, split it with shell quoting rules and
//! feed it through the same clap tree as shell mode.

use std::io::{self, BufRead};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::build_cli;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{check_meta_command, matches_to_action, CliAction, MetaCommand};
use crate::state::SessionState;

const PROMPT: &str = "contrail> ";
const HISTORY_FILE: &str = ".contrail_history";

/// What the loop should do after one line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Ok,
    Failed,
    Quit,
}

/// Interactive prompt with line editing and history.
pub fn run_repl(state: &SessionState, mode: OutputMode) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("(error) Failed to start line editor: {}", e);
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    println!("contrail {}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' to exit\n");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                if process_line(&line, state, mode) == LineOutcome::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::debug!(error = %e, "could not save history");
        }
    }
}

/// Read commands from stdin until EOF.
///
/// Returns the exit code: 1 if any line failed.
pub fn run_pipe(state: &SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    run_lines(stdin.lock(), state, mode)
}

pub(crate) fn run_lines<R: BufRead>(input: R, state: &SessionState, mode: OutputMode) -> i32 {
    let mut exit_code = 0;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) Failed to read input: {}", e);
                return 1;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match process_line(trimmed, state, mode) {
            LineOutcome::Ok => {}
            LineOutcome::Failed => exit_code = 1,
            LineOutcome::Quit => break,
        }
    }
    exit_code
}

/// Parse, execute and print one line.
pub fn process_line(line: &str, state: &SessionState, mode: OutputMode) -> LineOutcome {
    if let Some(meta) = check_meta_command(line) {
        return run_meta(meta);
    }

    let Some(words) = shlex::split(line) else {
        eprintln!("(error) Unbalanced quotes");
        return LineOutcome::Failed;
    };
    let argv = std::iter::once("contrail".to_string()).chain(words);
    let matches = match build_cli().try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("{}", e);
            return LineOutcome::Failed;
        }
    };
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        mode
    };

    match matches_to_action(&matches) {
        Ok(CliAction::Execute(cmd)) => match state.execute(cmd) {
            Ok(output) => {
                println!("{}", format_output(&output, mode));
                LineOutcome::Ok
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                LineOutcome::Failed
            }
        },
        Ok(CliAction::Meta(meta)) => run_meta(meta),
        Err(e) => {
            eprintln!("(error) {}", e);
            LineOutcome::Failed
        }
    }
}

fn run_meta(meta: MetaCommand) -> LineOutcome {
    match meta {
        MetaCommand::Quit => LineOutcome::Quit,
        MetaCommand::Clear => {
            print!("\x1B[2J\x1B[H");
            LineOutcome::Ok
        }
        MetaCommand::Help { command } => {
            let mut cli = build_cli();
            let help = match command {
                Some(name) => match cli.find_subcommand_mut(&name) {
                    Some(sub) => sub.render_help(),
                    None => {
                        eprintln!("(error) Unknown command: {}", name);
                        return LineOutcome::Failed;
                    }
                },
                None => cli.render_help(),
            };
            println!("{}", help);
            LineOutcome::Ok
        }
    }
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrail_engine::Database;
    use contrail_executor::Command;
    use std::sync::Arc;

    fn state() -> SessionState {
        SessionState::new(Arc::new(Database::ephemeral().unwrap()))
    }

    #[test]
    fn test_pipe_applies_every_line() {
        let state = state();
        let input = "\
# comment
ingest PK301 --lat 31.5 --lon 74.3 --alt 35000 --speed 450 --ts T1
ingest PK301 --lat 31.6 --lon 74.4 --alt 36000 --speed 455 --ts T2

ingest PK301 --lat 24.9 --lon 67.1 --alt 0 --speed 0 --ts T3 --status landed
";
        assert_eq!(run_lines(input.as_bytes(), &state, OutputMode::Human), 0);

        match state.execute(Command::Stats).unwrap() {
            contrail_executor::Output::Stats(stats) => {
                assert_eq!(stats.archived_flights, 1);
                assert_eq!(stats.ingests, 3);
            }
            other => panic!("expected stats, got {:?}", other),
        }
    }

    #[test]
    fn test_pipe_failure_sets_exit_code() {
        let state = state();
        let input = "track NOPE\nping\n";
        assert_eq!(run_lines(input.as_bytes(), &state, OutputMode::Human), 1);
    }

    #[test]
    fn test_quit_stops_pipe() {
        let state = state();
        let input = "quit\ntrack NOPE\n";
        assert_eq!(run_lines(input.as_bytes(), &state, OutputMode::Json), 0);
    }

    #[test]
    fn test_quoted_arguments() {
        let state = state();
        assert_eq!(
            process_line("search --status 'in_flight'", &state, OutputMode::Human),
            LineOutcome::Ok
        );
        assert_eq!(
            process_line("search --status 'in_flight", &state, OutputMode::Human),
            LineOutcome::Failed
        );
    }

    #[test]
    fn test_help_lines() {
        assert_eq!(
            run_meta(MetaCommand::Help { command: None }),
            LineOutcome::Ok
        );
        assert_eq!(
            run_meta(MetaCommand::Help {
                command: Some("ingest".into())
            }),
            LineOutcome::Ok
        );
        assert_eq!(
            run_meta(MetaCommand::Help {
                command: Some("fly".into())
            }),
            LineOutcome::Failed
        );
    }
}

//! ArgMatches → Command/MetaCommand conversion.
//!
//! Translates clap's parsed arguments into the appropriate action:
//! - Engine commands → `CliAction::Execute(Command)`
//! - REPL meta-commands → `CliAction::Meta`

use std::collections::BTreeMap;

use clap::ArgMatches;
use contrail_core::IngestRequest;
use contrail_executor::Command;

/// The result of parsing user input.
#[allow(dead_code)]
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// A command to run through the executor.
    Execute(Command),
    /// A REPL-only meta-command.
    Meta(MetaCommand),
}

/// REPL meta-commands.
#[derive(Debug, PartialEq)]
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;

    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => Some(MetaCommand::Help {
            command: parts.next().map(str::to_string),
        }),
        _ => None,
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let command = match sub_name {
        "ingest" => parse_ingest(sub_matches)?,
        "track" => Command::Track {
            id: required(sub_matches, "id")?,
            timestamp: sub_matches.get_one::<String>("at").cloned(),
        },
        "active" => Command::ListActive,
        "logs" => Command::ListLogs {
            limit: sub_matches.get_one::<usize>("limit").copied(),
        },
        "search" => parse_search(sub_matches),
        "stats" => Command::Stats,
        "ping" => Command::Ping,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(CliAction::Execute(command))
}

fn required(m: &ArgMatches, name: &str) -> Result<String, String> {
    m.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn number(m: &ArgMatches, name: &str) -> Result<f64, String> {
    m.get_one::<f64>(name)
        .copied()
        .ok_or_else(|| format!("Missing argument: --{}", name))
}

// =========================================================================
// Ingest
// =========================================================================

fn parse_ingest(m: &ArgMatches) -> Result<Command, String> {
    let mut request = IngestRequest::new(required(m, "id")?)
        .position(
            number(m, "lat")?,
            number(m, "lon")?,
            number(m, "alt")?,
            number(m, "speed")?,
        )
        .timestamp(required(m, "ts")?);
    if let Some(heading) = m.get_one::<f64>("heading") {
        request = request.heading(*heading);
    }
    if let Some(status) = m.get_one::<String>("status") {
        request = request.status(status.clone());
    }
    Ok(Command::Ingest(request))
}

// =========================================================================
// Search
// =========================================================================

/// Flags map onto the query keys the executor understands; numbers stay as
/// text so a bad value is reported by the engine like any other caller's.
fn parse_search(m: &ArgMatches) -> Command {
    const KEYS: [(&str, &str); 6] = [
        ("id", "flight_number"),
        ("status", "status"),
        ("min-alt", "min_altitude"),
        ("max-alt", "max_altitude"),
        ("min-speed", "min_speed"),
        ("max-speed", "max_speed"),
    ];

    let criteria: BTreeMap<String, String> = KEYS
        .iter()
        .filter_map(|(flag, key)| {
            m.get_one::<String>(flag)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect();
    Command::Search { criteria }
}

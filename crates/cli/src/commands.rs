//! clap command tree shared by shell, REPL and pipe modes.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the full command tree.
pub fn build_cli() -> Command {
    Command::new("contrail")
        .about("Flight telemetry tracking engine")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("DIR")
                .global(true)
                .help("Journal directory (default: data_dir from config, else .contrail)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("TOML configuration file (default: ./contrail.toml when present)"),
        )
        .arg(
            Arg::new("memory")
                .long("memory")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Keep everything in memory; nothing is written to disk"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .subcommand(ingest_cmd())
        .subcommand(
            Command::new("track")
                .about("Show a flight's current state and trajectory")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_name("TS")
                        .help("Return only the sample recorded at this timestamp"),
                ),
        )
        .subcommand(Command::new("active").about("List flights in the air"))
        .subcommand(
            Command::new("logs").about("List archived flights").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_name("N")
                    .value_parser(value_parser!(usize)),
            ),
        )
        .subcommand(search_cmd())
        .subcommand(Command::new("stats").about("Show engine counters"))
        .subcommand(Command::new("ping").about("Check the engine is alive"))
}

fn number(name: &'static str, long: &'static str, required: bool) -> Arg {
    Arg::new(name)
        .long(long)
        .value_name("NUM")
        .required(required)
        .allow_negative_numbers(true)
        .value_parser(value_parser!(f64))
}

fn ingest_cmd() -> Command {
    Command::new("ingest")
        .about("Record one telemetry sample")
        .arg(Arg::new("id").required(true).help("Flight number"))
        .arg(number("lat", "lat", true))
        .arg(number("lon", "lon", true))
        .arg(number("alt", "alt", true))
        .arg(number("speed", "speed", true))
        .arg(number("heading", "heading", false))
        .arg(Arg::new("ts").long("ts").value_name("TS").required(true))
        .arg(Arg::new("status").long("status").value_name("STATUS"))
}

fn search_cmd() -> Command {
    Command::new("search")
        .about("Search active flights and the archive")
        .arg(
            Arg::new("id")
                .long("id")
                .value_name("S")
                .help("Id substring"),
        )
        .arg(Arg::new("status").long("status").value_name("S"))
        .arg(Arg::new("min-alt").long("min-alt").value_name("NUM"))
        .arg(Arg::new("max-alt").long("max-alt").value_name("NUM"))
        .arg(Arg::new("min-speed").long("min-speed").value_name("NUM"))
        .arg(Arg::new("max-speed").long("max-speed").value_name("NUM"))
}

//! Output formatting: human-readable text or JSON.

use contrail_core::{PositionSample, SearchHit, TrackingView};
use contrail_executor::{ApiError, Output};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Render a successful result.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(output),
        OutputMode::Human => format_human(output),
    }
}

/// Render an error. JSON mode prints the wire error body.
pub fn format_error(err: &ApiError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&err.to_wire_error()),
        OutputMode::Human => format!("(error) {}: {}", err.error_code(), err.message()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {}\"}}", e))
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Ingested { message, id, .. } => format!("{} ({})", message, id),
        Output::Tracking(view) => format_tracking(view),
        Output::Sample(sample) => format!(
            "{} @ {}: {}",
            sample.id,
            sample.timestamp,
            format_position(&sample.position)
        ),
        Output::Active { active, count } => {
            if active.is_empty() {
                return "(no active flights)".to_string();
            }
            let mut lines = vec![format!("{} active flight(s)", count)];
            for (i, flight) in active.iter().enumerate() {
                lines.push(format!(
                    "{}) {} [{}] {} update(s), {}",
                    i + 1,
                    flight.id(),
                    flight.status(),
                    flight.sample_count(),
                    format_position(flight.current_position())
                ));
            }
            lines.join("\n")
        }
        Output::Logs { logs, count } => {
            if logs.is_empty() {
                return "(no archived flights)".to_string();
            }
            let mut lines = vec![format!("{} archived flight(s)", count)];
            for (i, flight) in logs.iter().enumerate() {
                lines.push(format!(
                    "{}) {} {} update(s), archived {}",
                    i + 1,
                    flight.id(),
                    flight.sample_count(),
                    flight.ended_at().to_rfc3339()
                ));
            }
            lines.join("\n")
        }
        Output::SearchResults { results, count, .. } => {
            if results.is_empty() {
                return "(no matches)".to_string();
            }
            let mut lines = vec![format!("{} match(es)", count)];
            lines.extend(
                results
                    .iter()
                    .enumerate()
                    .map(|(i, hit)| format_hit(i + 1, hit)),
            );
            lines.join("\n")
        }
        Output::Stats(stats) => [
            format!("active_flights:   {}", stats.active_flights),
            format!("archived_flights: {}", stats.archived_flights),
            format!("active_samples:   {}", stats.active_samples),
            format!("ingests:          {}", stats.ingests),
            format!("archivals:        {}", stats.archivals),
            format!("rejected:         {}", stats.rejected),
        ]
        .join("\n"),
        Output::Pong { version } => format!("PONG {}", version),
    }
}

fn format_position(p: &PositionSample) -> String {
    format!(
        "lat {:.4} lon {:.4} alt {} spd {} hdg {} ({})",
        p.latitude, p.longitude, p.altitude, p.speed, p.heading, p.timestamp
    )
}

fn format_tracking(view: &TrackingView) -> String {
    let mut lines = vec![
        format!("flight:  {}", view.id),
        format!("status:  {}", view.status),
        format!("updates: {}", view.total_updates),
    ];
    if let Some(current) = &view.current_position {
        lines.push(format!("current: {}", format_position(current)));
    }
    lines.push("history:".to_string());
    for sample in &view.history {
        lines.push(format!("  {}", format_position(sample)));
    }
    lines.join("\n")
}

fn format_hit(n: usize, hit: &SearchHit) -> String {
    let position = hit
        .current_position
        .as_ref()
        .map(format_position)
        .unwrap_or_else(|| format!("{} update(s)", hit.total_updates));
    format!("{}) {} [{}] {}", n, hit.id, hit.status, position)
}

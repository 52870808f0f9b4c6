pub mod delivery;
pub mod evidence;
pub mod hygiene;

use tracing::debug;

use crate::classify::ClassifiedTicket;

/// Line emitted when no heuristic fires.
pub const NO_ANOMALIES: &str = "No anomalies detected.";

/// Everything a heuristic may look at.
pub struct ObservationContext<'a> {
    pub tickets: &'a [ClassifiedTicket],
    /// Share of the sprint scope already shipped, 0..=100
    pub delivered_pct: u32,
    /// Share of the sprint calendar already elapsed, 0..=100
    pub elapsed_pct: u32,
    /// Max points delivery may trail elapsed time before it is reported
    pub lag_threshold: u32,
}

/// An independent anomaly check over the classified ticket set.
pub trait Heuristic {
    /// Short name, used in logs.
    fn name(&self) -> &str;

    /// One free-text line when the anomaly is present.
    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String>;
}

/// Evaluate every heuristic in a fixed order.
///
/// Returns one line per firing heuristic, or a single "no anomalies" line.
pub fn run_all(ctx: &ObservationContext<'_>) -> Vec<String> {
    let heuristics: [&dyn Heuristic; 6] = [
        &delivery::DeliveryLag,
        &evidence::ShippedWithoutCode,
        &evidence::StatusMismatch,
        &evidence::MergedNotDone,
        &hygiene::Unassigned,
        &hygiene::Blocked,
    ];

    let mut lines = Vec::new();
    for heuristic in heuristics {
        if let Some(line) = heuristic.observe(ctx) {
            debug!(heuristic = heuristic.name(), "observation fired");
            lines.push(line);
        }
    }

    if lines.is_empty() {
        lines.push(NO_ANOMALIES.to_string());
    }
    lines
}

/// Comma-separated ticket keys.
fn keys<'a>(tickets: impl IntoIterator<Item = &'a ClassifiedTicket>) -> String {
    tickets
        .into_iter()
        .map(|t| t.ticket.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

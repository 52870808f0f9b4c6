use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classify::{Category, RepoCounts};
use crate::sprint::Sprint;
use crate::tracker::Ticket;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Csv,
    Json,
}

/// A classified ticket with its display summaries.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub ticket: Ticket,
    pub category: Category,
    /// Short description of the code activity behind the ticket
    pub code_activity: String,
    /// Review outcome of its open PRs, "-" when none
    pub review_status: String,
    /// Open PRs under review, "-" when none
    pub pr_summary: String,
}

/// One row of the repository breakdown.
#[derive(Debug, Clone)]
pub struct RepoRow {
    pub name: String,
    pub counts: RepoCounts,
}

/// Complete sprint report, ready to render.
#[derive(Debug)]
pub struct Report {
    pub sprint: Sprint,
    pub generated: NaiveDateTime,
    /// Share of the sprint calendar elapsed
    pub elapsed_pct: u32,
    /// Share of the scope shipped (points when available, tickets otherwise)
    pub delivered_pct: u32,
    /// Every ticket, ordered by team then priority
    pub entries: Vec<ReportEntry>,
    /// Fixed repository list with its counters
    pub repositories: Vec<RepoRow>,
    pub observations: Vec<String>,
    /// Whether any ticket carries story points
    pub has_points: bool,
    /// Tracker browse URL used to link ticket keys
    pub browse_url: Option<String>,
}

impl Report {
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.in_category(category).count()
    }

    pub fn points(&self, category: Category) -> f64 {
        self.in_category(category)
            .filter_map(|e| e.ticket.points)
            .sum()
    }

    pub fn total_points(&self) -> f64 {
        self.entries.iter().filter_map(|e| e.ticket.points).sum()
    }
}

/// Flat per-ticket row shared by the CSV and JSON exports.
#[derive(Debug, Clone, Serialize)]
pub struct TicketRow {
    pub category: Category,
    pub key: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub status: String,
    pub status_category: String,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub team: String,
    pub points: Option<f64>,
    pub flagged: bool,
    pub code_activity: String,
    pub review_status: String,
    /// Matched PR links, space separated
    pub pull_requests: String,
}

impl From<&ReportEntry> for TicketRow {
    fn from(entry: &ReportEntry) -> Self {
        let t = &entry.ticket;
        TicketRow {
            category: entry.category,
            key: t.key.clone(),
            summary: t.summary.clone(),
            issue_type: t.issue_type.clone(),
            status: t.status.clone(),
            status_category: t.status_category.clone(),
            priority: t.priority.clone(),
            assignee: t.assignee.clone(),
            team: t.team.to_string(),
            points: t.points,
            flagged: t.flagged,
            code_activity: entry.code_activity.clone(),
            review_status: entry.review_status.clone(),
            pull_requests: t
                .pull_requests
                .iter()
                .map(|pr| pr.link())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

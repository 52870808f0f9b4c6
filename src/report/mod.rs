pub mod activity;
pub mod export;
pub mod markdown;
pub mod types;

pub use types::{OutputFormat, RepoRow, Report, ReportEntry};

use chrono::NaiveDateTime;
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::classify::{Category, ClassifiedTicket, RepoStats};
use crate::config::Config;
use crate::observations::{self, ObservationContext};
use crate::pr::{BranchMap, ReviewMap};
use crate::sprint::Sprint;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build a Report from classified tickets and the run's side inputs.
///
/// Derives per-ticket summaries, delivery and elapsed percentages, the fixed
/// repository breakdown and the observation lines. Tickets are ordered by
/// team, then priority.
pub fn build(
    classified: Vec<ClassifiedTicket>,
    sprint: Sprint,
    now: NaiveDateTime,
    stats: &RepoStats,
    reviews: &ReviewMap,
    branches: &BranchMap,
    config: &Config,
) -> Report {
    let prefixes = &config.report.repo_prefixes;
    let has_points = classified.iter().any(|c| c.ticket.points.is_some());
    let elapsed_pct = sprint.elapsed_pct(now.date());
    let delivered_pct = delivered_pct(&classified, has_points);

    let observations = observations::run_all(&ObservationContext {
        tickets: &classified,
        delivered_pct,
        elapsed_pct,
        lag_threshold: config.report.lag_threshold,
    });

    let repositories = config
        .report
        .breakdown_repos
        .iter()
        .map(|repo| RepoRow {
            name: repo.clone(),
            counts: stats.get(repo),
        })
        .collect();

    let mut entries: Vec<ReportEntry> = classified
        .into_iter()
        .map(|c| {
            let code_activity = activity::code_activity(&c.ticket, branches, prefixes);
            debug!(
                key = %c.ticket.key,
                category = %c.category,
                rule = c.rule,
                code_activity = %code_activity,
                "report entry"
            );
            ReportEntry {
                review_status: activity::review_summary(&c.ticket, reviews, prefixes),
                pr_summary: activity::pr_summary(&c.ticket, prefixes),
                code_activity,
                ticket: c.ticket,
                category: c.category,
            }
        })
        .collect();
    entries.sort_by_key(|e| (e.ticket.team, e.ticket.priority_rank()));

    Report {
        sprint,
        generated: now,
        elapsed_pct,
        delivered_pct,
        entries,
        repositories,
        observations,
        has_points,
        browse_url: config.tracker.browse_url.clone(),
    }
}

/// Shipped share of the sprint: by points when any ticket carries them,
/// by ticket count otherwise.
fn delivered_pct(tickets: &[ClassifiedTicket], by_points: bool) -> u32 {
    let shipped = tickets.iter().filter(|t| t.category == Category::Shipped);
    let (done, total) = if by_points {
        (
            shipped.filter_map(|t| t.ticket.points).sum::<f64>(),
            tickets.iter().filter_map(|t| t.ticket.points).sum::<f64>(),
        )
    } else {
        (shipped.count() as f64, tickets.len() as f64)
    };
    if total <= 0.0 {
        0
    } else {
        (done * 100.0 / total).round() as u32
    }
}

/// Render the report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String, ReportError> {
    Ok(match format {
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Csv => export::render_csv(report),
        OutputFormat::Json => export::render_json(report)?,
    })
}

/// Write the rendered report to a file, or to stdout when no path is given.
///
/// Rendering happens before anything is written, so a failure leaves no
/// partial output behind.
#[instrument(skip(report), fields(sprint = %report.sprint.name, tickets = report.entries.len()))]
pub fn output(
    report: &Report,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<(), ReportError> {
    let rendered = render(report, format)?;
    match output_path {
        None => {
            debug!("writing report to stdout");
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            std::fs::write(path, rendered)?;
            print_terminal_summary(report, path);
        }
    }
    Ok(())
}

/// One colored tally line per category after a report file was written.
fn print_terminal_summary(report: &Report, path: &Path) {
    println!("Report written to {}", path.display());
    for category in Category::ALL {
        println!(
            "  {:<12} {}",
            colorize_category(category),
            report.count(category)
        );
    }
}

fn colorize_category(category: Category) -> colored::ColoredString {
    let label = category.title();
    match category {
        Category::Blocked => label.red().bold(),
        Category::Shipped => label.green().bold(),
        Category::InReview => label.cyan().bold(),
        Category::InProgress => label.yellow().bold(),
        Category::NotStarted => label.dimmed(),
    }
}

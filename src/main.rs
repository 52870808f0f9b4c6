mod classify;
mod config;
mod enrich;
mod input;
mod observations;
mod pr;
mod report;
mod sprint;
#[cfg(test)]
mod testutil;
mod tracker;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use report::OutputFormat;

/// Sprint Report: turns a tracker issue export and code-host pull request
/// exports into a sprint status report (Markdown, CSV or JSON).
#[derive(Parser, Debug)]
#[command(name = "sprint-report", version, about)]
struct Cli {
    /// Tracker issues export (JSON array or search response)
    #[arg(long)]
    issues: PathBuf,

    /// Sprint name shown in the report title
    #[arg(long)]
    sprint: String,

    /// Sprint start date (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Sprint end date (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Tracker project key (e.g., HUM)
    #[arg(long)]
    project: String,

    /// Pull request export (JSON array)
    #[arg(long)]
    prs: Option<PathBuf>,

    /// Review status map keyed by repo#number
    #[arg(long)]
    reviews: Option<PathBuf>,

    /// Branch list map keyed by ticket key
    #[arg(long)]
    branches: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Output file path; the report goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to $SPRINT_REPORT_CONFIG, then ./.sprint-report.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("sprint_report", sprint = %cli.sprint, project = %cli.project).entered();

    let now = chrono::Local::now().naive_local();
    let built_report = build_report(&cli, now)?;

    info!(format = ?cli.format, "writing report");
    report::output(&built_report, cli.format, cli.output.as_deref())?;
    info!(
        tickets = built_report.entries.len(),
        delivered_pct = built_report.delivered_pct,
        elapsed_pct = built_report.elapsed_pct,
        "done"
    );

    Ok(())
}

/// Run the whole pipeline up to a rendered-ready Report.
/// Every input is read before any processing starts.
fn build_report(cli: &Cli, now: NaiveDateTime) -> Result<report::Report, Box<dyn std::error::Error>> {
    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;

    info!("loading inputs");
    let mut tickets = tracker::load_tickets(&cli.issues, &config.tracker)?;
    let prs = match &cli.prs {
        Some(path) => pr::load_pull_requests(path)?,
        None => Vec::new(),
    };
    let reviews = match &cli.reviews {
        Some(path) => pr::load_reviews(path)?,
        None => pr::ReviewMap::new(),
    };
    let branches = match &cli.branches {
        Some(path) => pr::load_branches(path)?,
        None => pr::BranchMap::new(),
    };
    info!(tickets = tickets.len(), pull_requests = prs.len(), "inputs loaded");

    let project_prefix = format!("{}-", cli.project);
    let foreign = tickets
        .iter()
        .filter(|t| !t.key.starts_with(&project_prefix))
        .count();
    if foreign > 0 {
        warn!(foreign, project = %cli.project, "tickets outside the project key are included");
    }

    info!("enriching tickets");
    enrich::enrich(&mut tickets, &prs, &config.teams);

    info!("classifying tickets");
    let classified = classify::classify_all(tickets);
    let stats = classify::RepoStats::collect(&classified, &branches);
    for category in classify::Category::ALL {
        debug!(
            category = %category,
            tickets = classified.iter().filter(|c| c.category == category).count(),
            "bucket size"
        );
    }

    let sprint = sprint::Sprint {
        name: cli.sprint.clone(),
        project: cli.project.clone(),
        start: cli.start,
        end: cli.end,
    };

    info!("building report");
    Ok(report::build(classified, sprint, now, &stats, &reviews, &branches, &config))
}

use super::types::{Report, ReportEntry};
use crate::classify::Category;

/// Longest summary shown in a ticket table, in characters.
const TITLE_WIDTH: usize = 65;

const EXPORT_SECTION: &str = "\
## Export

This report can be exported in multiple formats:

- **CSV**: re-run with `--format csv` for spreadsheets
- **JSON**: re-run with `--format json` for tooling
- **Clipboard**: copy the Markdown above into Slack, Notion or Google Docs
";

/// Render the full Markdown report.
///
/// # Sprint Report: Sprint 42
/// **Project:** HUM
/// **Dates:** 2024-05-01 to 2024-05-15
/// **Generated:** 2024-05-08 09:30
///
/// ## Summary
/// | Category | Tickets | % |
/// ...
/// ## Shipped (3)
/// | Ticket | Title | Type | Assignee | Code |
pub fn render(report: &Report) -> String {
    let mut md = String::new();
    let sprint = &report.sprint;

    md.push_str(&format!("# Sprint Report: {}\n\n", sprint.name));
    md.push_str(&format!("**Project:** {}\n", sprint.project));
    md.push_str(&format!("**Dates:** {} to {}\n", sprint.start, sprint.end));
    md.push_str(&format!(
        "**Generated:** {}\n",
        report.generated.format("%Y-%m-%d %H:%M")
    ));
    md.push_str(&format!("**Elapsed:** {}% of the sprint\n\n", report.elapsed_pct));

    render_summary(report, &mut md);
    md.push_str("---\n\n");

    for category in Category::ALL {
        let entries: Vec<&ReportEntry> = report.in_category(category).collect();
        if entries.is_empty() {
            continue;
        }
        md.push_str(&format!("## {} ({})\n\n", category.title(), entries.len()));
        render_ticket_table(report, category, &entries, &mut md);
    }

    md.push_str("---\n\n");
    md.push_str("## Repository breakdown\n\n");
    md.push_str("| Repo | Merged | Open PRs | WIP branches |\n");
    md.push_str("|---|---:|---:|---:|\n");
    for repo in &report.repositories {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            repo.name, repo.counts.merged, repo.counts.open, repo.counts.wip
        ));
    }
    md.push('\n');

    md.push_str("## Observations\n\n");
    for line in &report.observations {
        md.push_str(&format!("- {line}\n"));
    }
    md.push('\n');

    md.push_str("---\n\n");
    md.push_str(EXPORT_SECTION);
    md
}

fn render_summary(report: &Report, md: &mut String) {
    let total = report.entries.len();
    let total_points = report.total_points();

    md.push_str("## Summary\n\n");
    if report.has_points {
        md.push_str("| Category | Tickets | % Tickets | Points | % Points |\n");
        md.push_str("|---|---:|---:|---:|---:|\n");
    } else {
        md.push_str("| Category | Tickets | % |\n");
        md.push_str("|---|---:|---:|\n");
    }

    for category in Category::ALL {
        let count = report.count(category);
        let mut row = format!(
            "| {} | {} | {}% |",
            category.title(),
            count,
            percent(count as f64, total as f64)
        );
        if report.has_points {
            let points = report.points(category);
            row.push_str(&format!(
                " {} | {}% |",
                format_points(points),
                percent(points, total_points)
            ));
        }
        md.push_str(&row);
        md.push('\n');
    }

    let mut total_row = format!("| **Total** | **{}** | 100% |", total);
    if report.has_points {
        total_row.push_str(&format!(" **{}** | 100% |", format_points(total_points)));
    }
    md.push_str(&total_row);
    md.push_str("\n\n");

    let shipped_tickets = percent(report.count(Category::Shipped) as f64, total as f64);
    if report.has_points {
        let shipped_points = percent(report.points(Category::Shipped), total_points);
        md.push_str(&format!(
            "**Delivery: {shipped_tickets}% of tickets shipped ({shipped_points}% by points)**\n\n"
        ));
    } else {
        md.push_str(&format!("**Delivery: {shipped_tickets}% of tickets shipped**\n\n"));
    }
}

/// Column headers of a category table.
fn headers(category: Category) -> &'static [&'static str] {
    match category {
        Category::Shipped => &["Ticket", "Title", "Type", "Assignee", "Code"],
        Category::InReview => &["Ticket", "Title", "Type", "Assignee", "PRs", "Review status"],
        Category::InProgress => &["Ticket", "Title", "Type", "Assignee", "Activity"],
        Category::Blocked => &["Ticket", "Title", "Assignee", "Notes"],
        Category::NotStarted => &["Ticket", "Title", "Type", "Assignee"],
    }
}

fn cells(report: &Report, category: Category, entry: &ReportEntry) -> Vec<String> {
    let t = &entry.ticket;
    let key = ticket_link(report, &t.key);
    let title = escape_cell(&truncate(&t.summary, TITLE_WIDTH));
    let issue_type = escape_cell(&t.issue_type);
    let assignee = escape_cell(t.assignee.as_deref().unwrap_or("Unassigned"));

    match category {
        Category::Shipped => vec![key, title, issue_type, assignee, escape_cell(&entry.code_activity)],
        Category::InReview => vec![
            key,
            title,
            issue_type,
            assignee,
            escape_cell(&entry.pr_summary),
            escape_cell(&entry.review_status),
        ],
        Category::InProgress => vec![key, title, issue_type, assignee, escape_cell(&entry.code_activity)],
        Category::Blocked => vec![key, title, assignee, "Flagged in tracker".to_string()],
        Category::NotStarted => vec![key, title, issue_type, assignee],
    }
}

fn render_ticket_table(report: &Report, category: Category, entries: &[&ReportEntry], md: &mut String) {
    let headers = headers(category);
    md.push_str(&format!("| {} |\n", headers.join(" | ")));
    md.push_str(&format!("|{}\n", "---|".repeat(headers.len())));

    for entry in entries {
        md.push_str(&format!("| {} |\n", cells(report, category, entry).join(" | ")));
    }
    md.push('\n');
}

fn ticket_link(report: &Report, key: &str) -> String {
    match &report.browse_url {
        Some(base) => format!("[{}]({}/{})", key, base.trim_end_matches('/'), key),
        None => key.to_string(),
    }
}

/// Cut to at most `width` characters.
fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Keep cell text on one line and away from column separators.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn percent(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        0
    } else {
        (part * 100.0 / total).round() as u32
    }
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

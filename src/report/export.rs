use chrono::NaiveDate;
use serde::Serialize;

use super::types::{Report, TicketRow};

/// Fixed CSV column set, in order.
pub const CSV_COLUMNS: [&str; 14] = [
    "category",
    "key",
    "summary",
    "type",
    "status",
    "status_category",
    "priority",
    "assignee",
    "team",
    "points",
    "flagged",
    "code_activity",
    "review_status",
    "pull_requests",
];

#[derive(Serialize)]
struct JsonExport<'a> {
    sprint: &'a str,
    project: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    elapsed_pct: u32,
    total: usize,
    tickets: Vec<TicketRow>,
}

/// One flat row per ticket, in category display order.
pub fn rows(report: &Report) -> Vec<TicketRow> {
    crate::classify::Category::ALL
        .into_iter()
        .flat_map(|category| report.in_category(category))
        .map(TicketRow::from)
        .collect()
}

/// Render every ticket as a CSV row under the fixed header.
pub fn render_csv(report: &Report) -> String {
    let mut out = CSV_COLUMNS.join(",");
    out.push('\n');

    for row in rows(report) {
        let fields = [
            row.category.label().to_string(),
            row.key,
            row.summary,
            row.issue_type,
            row.status,
            row.status_category,
            row.priority.unwrap_or_default(),
            row.assignee.unwrap_or_default(),
            row.team,
            row.points.map(|p| p.to_string()).unwrap_or_default(),
            row.flagged.to_string(),
            row.code_activity,
            row.review_status,
            row.pull_requests,
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Render sprint metadata plus the flat ticket list as pretty JSON.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    let export = JsonExport {
        sprint: &report.sprint.name,
        project: &report.sprint.project,
        start: report.sprint.start,
        end: report.sprint.end,
        elapsed_pct: report.elapsed_pct,
        total: report.entries.len(),
        tickets: rows(report),
    };
    let mut json = serde_json::to_string_pretty(&export)?;
    json.push('\n');
    Ok(json)
}

/// Quote a field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }
}

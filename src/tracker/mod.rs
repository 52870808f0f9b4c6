pub mod branch;
pub mod dev_status;
pub mod types;

pub use types::{BranchRef, BranchTarget, DevState, RawTicket, Team, Ticket};
#[cfg(test)]
pub use types::DevInfo;

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

use crate::config::TrackerConfig;
use crate::input::{load_json, InputError};

/// Issues file: either a bare array or a search response envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum IssuesFile {
    List(Vec<RawTicket>),
    Search { issues: Vec<RawTicket> },
}

/// Load and normalize the tracker export. The file is required; any read or
/// parse failure aborts the run.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_tickets(path: &Path, fields: &TrackerConfig) -> Result<Vec<Ticket>, InputError> {
    let raw = match load_json::<IssuesFile>(path)? {
        IssuesFile::List(issues) | IssuesFile::Search { issues } => issues,
    };
    debug!(issues = raw.len(), "loaded tracker issues");
    Ok(raw.into_iter().map(|r| normalize(r, fields)).collect())
}

/// Convert a raw tracker record into a canonical Ticket.
///
/// Optional sub-fields that are missing or malformed fall back to neutral
/// values; this never fails.
pub fn normalize(raw: RawTicket, fields: &TrackerConfig) -> Ticket {
    let RawTicket { key, fields: raw_fields } = raw;
    let custom = &raw_fields.custom;

    let flagged = [fields.flagged_field.as_str(), "flagged"]
        .iter()
        .any(|name| custom.get(*name).is_some_and(is_truthy));
    let points = custom.get(&fields.points_field).and_then(as_points);
    let dev = dev_status::parse_dev_value(custom.get(&fields.development_field));
    let branch = custom
        .get(&fields.branch_field)
        .and_then(Value::as_str)
        .and_then(branch::parse_branch_ref);

    debug!(key = %key, flagged, ?points, dev_prs = dev.pr_count, has_branch = branch.is_some(), "normalized ticket");

    Ticket {
        key,
        summary: raw_fields.summary,
        issue_type: raw_fields.issuetype.map(|t| t.name).unwrap_or_default(),
        status_category: raw_fields
            .status
            .status_category
            .map(|c| c.name)
            .unwrap_or_default(),
        status: raw_fields.status.name,
        priority: raw_fields.priority.map(|p| p.name),
        assignee: raw_fields
            .assignee
            .map(|a| a.display_name)
            .filter(|name| !name.trim().is_empty()),
        flagged,
        points,
        team: Team::Other,
        pull_requests: Vec::new(),
        dev,
        branch,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn as_points(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn raw(value: Value) -> RawTicket {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let fields = TrackerConfig::default();
        let ticket = normalize(
            raw(json!({
                "key": "HUM-1",
                "fields": {
                    "summary": "[BE] Add export endpoint",
                    "issuetype": {"name": "Story"},
                    "status": {"name": "In Review", "statusCategory": {"name": "In Progress"}},
                    "priority": {"name": "High"},
                    "assignee": {"displayName": "Ana"},
                    "customfield_10021": [{"value": "Impediment"}],
                    "customfield_10028": 5.0,
                    "customfield_10000": "{pullrequest={dataType=pullrequest, state=OPEN, stateCount=1}}",
                    "customfield_10097": "https://github.com/humand-co/humand-main-api/tree/HUM-1-export"
                }
            })),
            &fields,
        );
        assert_eq!(ticket.key, "HUM-1");
        assert_eq!(ticket.issue_type, "Story");
        assert_eq!(ticket.status, "In Review");
        assert_eq!(ticket.status_category, "In Progress");
        assert_eq!(ticket.priority.as_deref(), Some("High"));
        assert_eq!(ticket.assignee.as_deref(), Some("Ana"));
        assert!(ticket.flagged);
        assert_eq!(ticket.points, Some(5.0));
        assert_eq!(ticket.dev.pr_count, 1);
        assert!(ticket.dev.reports_open());
        assert_eq!(ticket.branch.as_ref().map(|b| b.repo.as_str()), Some("humand-main-api"));
        assert_eq!(ticket.team, Team::Other);
        assert!(ticket.pull_requests.is_empty());
    }

    #[test]
    fn test_normalize_minimal_record_uses_neutral_defaults() {
        let ticket = normalize(
            raw(json!({
                "key": "HUM-2",
                "fields": {"summary": "Bare", "status": {"name": "To Do"}}
            })),
            &TrackerConfig::default(),
        );
        assert!(!ticket.flagged);
        assert!(ticket.points.is_none());
        assert!(ticket.assignee.is_none());
        assert!(ticket.branch.is_none());
        assert_eq!(ticket.dev, DevInfo::default());
        assert_eq!(ticket.status_category, "");
    }

    #[test]
    fn test_normalize_malformed_optional_fields() {
        let ticket = normalize(
            raw(json!({
                "key": "HUM-3",
                "fields": {
                    "summary": "Odd",
                    "status": {"name": "To Do"},
                    "customfield_10021": [],
                    "customfield_10028": "n/a",
                    "customfield_10000": 42,
                    "customfield_10097": "see slack"
                }
            })),
            &TrackerConfig::default(),
        );
        assert!(!ticket.flagged);
        assert!(ticket.points.is_none());
        assert_eq!(ticket.dev, DevInfo::default());
        assert!(ticket.branch.is_none());
    }

    #[test]
    fn test_plain_flagged_field_also_blocks() {
        let ticket = normalize(
            raw(json!({
                "key": "HUM-4",
                "fields": {"summary": "x", "status": {"name": "To Do"}, "flagged": true}
            })),
            &TrackerConfig::default(),
        );
        assert!(ticket.flagged);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("Impediment")));
        assert!(is_truthy(&json!({"value": "x"})));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_points_from_string() {
        assert_eq!(as_points(&json!("3")), Some(3.0));
        assert_eq!(as_points(&json!(2.5)), Some(2.5));
        assert_eq!(as_points(&json!(null)), None);
    }

    #[test]
    fn test_load_tickets_accepts_search_envelope() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"issues": [{{"key": "HUM-9", "fields": {{"summary": "x", "status": {{"name": "Done"}}}}}}]}}"#
        )
        .unwrap();
        let tickets = load_tickets(file.path(), &TrackerConfig::default()).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].key, "HUM-9");
    }

    #[test]
    fn test_load_tickets_missing_required_field_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"key": "HUM-9", "fields": {{"status": {{"name": "Done"}}}}}}]"#).unwrap();
        assert!(load_tickets(file.path(), &TrackerConfig::default()).is_err());
    }
}

use serde::Deserialize;
use std::collections::HashMap;

use crate::pr::PullRequestRef;

/// An issue as exported by the tracker's search API.
/// Only the fields the report reads are modelled; custom fields land in `custom`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicket {
    pub key: String,
    pub fields: RawFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFields {
    pub summary: String,
    pub status: RawStatus,
    #[serde(default)]
    pub issuetype: Option<Named>,
    #[serde(default)]
    pub priority: Option<Named>,
    #[serde(default)]
    pub assignee: Option<RawUser>,
    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatus {
    pub name: String,
    #[serde(default, rename = "statusCategory")]
    pub status_category: Option<Named>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Owning team, inferred during enrichment. Variant order is report row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Team {
    Frontend,
    Backend,
    Mobile,
    Translations,
    #[default]
    Other,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Frontend => write!(f, "frontend"),
            Team::Backend => write!(f, "backend"),
            Team::Mobile => write!(f, "mobile"),
            Team::Translations => write!(f, "translations"),
            Team::Other => write!(f, "other"),
        }
    }
}

/// Aggregate PR state as reported by the tracker's development field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevState {
    Open,
    Merged,
    Declined,
    Other(String),
}

impl DevState {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "OPEN" => DevState::Open,
            "MERGED" => DevState::Merged,
            "DECLINED" => DevState::Declined,
            other => DevState::Other(other.to_string()),
        }
    }
}

/// Parsed development-status blob. `DevInfo::default()` is the neutral value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevInfo {
    pub pr_count: u32,
    pub state: Option<DevState>,
    pub open: bool,
}

impl DevInfo {
    pub fn reports_merged(&self) -> bool {
        self.state == Some(DevState::Merged) && !self.open
    }

    pub fn reports_open(&self) -> bool {
        self.open && self.state == Some(DevState::Open)
    }
}

/// What a branch reference URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchTarget {
    Branch(String),
    PullRequest(u64),
}

/// A branch or pull request link stored on the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub repo: String,
    pub target: BranchTarget,
}

/// Canonical ticket record.
///
/// `team` and `pull_requests` are filled in by enrichment; everything else is
/// fixed at normalization time.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub key: String,
    pub summary: String,
    pub issue_type: String,
    pub status: String,
    pub status_category: String,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub flagged: bool,
    pub points: Option<f64>,
    pub team: Team,
    pub pull_requests: Vec<PullRequestRef>,
    pub dev: DevInfo,
    pub branch: Option<BranchRef>,
}

/// Tracker priorities, highest first.
const PRIORITY_ORDER: [&str; 5] = ["Highest", "High", "Medium", "Low", "Lowest"];

impl Ticket {
    /// Position of the priority in PRIORITY_ORDER; unknown or missing sorts last.
    pub fn priority_rank(&self) -> usize {
        self.priority
            .as_deref()
            .and_then(|p| PRIORITY_ORDER.iter().position(|known| known.eq_ignore_ascii_case(p)))
            .unwrap_or(PRIORITY_ORDER.len())
    }

    pub fn status_category_is(&self, name: &str) -> bool {
        self.status_category.eq_ignore_ascii_case(name)
    }

    /// Neither matched PRs nor tracker dev info mention a pull request.
    pub fn has_no_pr_evidence(&self) -> bool {
        self.pull_requests.is_empty() && self.dev.pr_count == 0
    }

    /// Repositories tied to this ticket through its branch link or matched PRs.
    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.branch
            .iter()
            .map(|b| b.repo.as_str())
            .chain(self.pull_requests.iter().map(|pr| pr.repo_name()))
    }
}

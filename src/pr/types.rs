use serde::Deserialize;

/// A pull request record from the code host export.
///
/// Field names follow the snake_case export format; the GitHub CLI spellings
/// (`headRefName`, `isDraft`, `mergedAt`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestRef {
    /// Repository, either `name` or `owner/name`
    pub repo: String,
    pub number: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "headRefName")]
    pub branch: String,
    /// OPEN, CLOSED or MERGED (case-insensitive)
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub merged: bool,
    #[serde(default, alias = "mergedAt")]
    pub merged_at: Option<String>,
    #[serde(default, alias = "isDraft")]
    pub draft: bool,
}

impl PullRequestRef {
    /// Repository name without the owner segment.
    pub fn repo_name(&self) -> &str {
        self.repo.rsplit('/').next().unwrap_or(&self.repo)
    }

    pub fn is_merged(&self) -> bool {
        self.merged || self.merged_at.is_some() || self.state.eq_ignore_ascii_case("merged")
    }

    pub fn is_open(&self) -> bool {
        self.state.eq_ignore_ascii_case("open") && !self.is_merged()
    }

    /// Web URL, or `repo#number` when the export carried none.
    pub fn link(&self) -> String {
        if self.url.is_empty() {
            self.review_key()
        } else {
            self.url.clone()
        }
    }

    /// Key used by the review-status file, e.g. `humand-web#42`.
    pub fn review_key(&self) -> String {
        format!("{}#{}", self.repo_name(), self.number)
    }
}

/// Review decision and check results for one pull request.
///
/// Accepts `{"review": "APPROVED", "checks": ["SUCCESS"]}` as written by the
/// PR search script, and the GitHub CLI shape with `reviewDecision` and
/// check objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewStatus {
    #[serde(default, alias = "review", alias = "reviewDecision")]
    pub decision: Option<String>,
    #[serde(default)]
    pub checks: Vec<CheckRun>,
}

/// One check result: a bare conclusion string or a check-run object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CheckRun {
    Conclusion(String),
    Run {
        /// SUCCESS, FAILURE, ...; absent while the check is still running
        #[serde(default)]
        conclusion: Option<String>,
    },
}

impl CheckRun {
    pub fn conclusion(&self) -> Option<&str> {
        match self {
            CheckRun::Conclusion(c) => Some(c),
            CheckRun::Run { conclusion } => conclusion.as_deref(),
        }
    }
}

/// A branch that exists on the code host for a ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchEntry {
    pub repo: String,
    #[serde(default, alias = "name")]
    pub branch: String,
}

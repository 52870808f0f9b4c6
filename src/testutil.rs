//! Builders shared by the unit tests.

use crate::pr::PullRequestRef;
use crate::tracker::{DevInfo, Team, Ticket};

/// A ticket in "To Do" with no code evidence at all.
pub fn ticket(key: &str, summary: &str) -> Ticket {
    Ticket {
        key: key.to_string(),
        summary: summary.to_string(),
        issue_type: "Story".to_string(),
        status: "To Do".to_string(),
        status_category: "To Do".to_string(),
        priority: Some("Medium".to_string()),
        assignee: Some("Ana".to_string()),
        flagged: false,
        points: None,
        team: Team::Other,
        pull_requests: Vec::new(),
        dev: DevInfo::default(),
        branch: None,
    }
}

/// An open, non-draft pull request.
pub fn pr(repo: &str, number: u64, title: &str, branch: &str) -> PullRequestRef {
    PullRequestRef {
        repo: repo.to_string(),
        number,
        url: format!("https://github.com/humand-co/{repo}/pull/{number}"),
        title: title.to_string(),
        branch: branch.to_string(),
        state: "OPEN".to_string(),
        merged: false,
        merged_at: None,
        draft: false,
    }
}

pub fn merged_pr(repo: &str, number: u64, title: &str) -> PullRequestRef {
    PullRequestRef {
        state: "MERGED".to_string(),
        merged: true,
        ..pr(repo, number, title, "")
    }
}

pub fn closed_pr(repo: &str, number: u64, title: &str) -> PullRequestRef {
    PullRequestRef {
        state: "CLOSED".to_string(),
        ..pr(repo, number, title, "")
    }
}

pub fn draft_pr(repo: &str, number: u64, title: &str) -> PullRequestRef {
    PullRequestRef {
        draft: true,
        ..pr(repo, number, title, "")
    }
}

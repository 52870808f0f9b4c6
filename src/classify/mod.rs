pub mod repo_stats;

pub use repo_stats::{RepoCounts, RepoStats};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::tracker::Ticket;

/// Sprint-status bucket. Every ticket lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Blocked,
    Shipped,
    InReview,
    InProgress,
    NotStarted,
}

impl Category {
    /// Report section order.
    pub const ALL: [Category; 5] = [
        Category::Shipped,
        Category::InReview,
        Category::InProgress,
        Category::Blocked,
        Category::NotStarted,
    ];

    /// Stable machine label, used in CSV/JSON.
    pub fn label(self) -> &'static str {
        match self {
            Category::Blocked => "blocked",
            Category::Shipped => "shipped",
            Category::InReview => "in_review",
            Category::InProgress => "in_progress",
            Category::NotStarted => "not_started",
        }
    }

    /// Section heading used in the Markdown report.
    pub fn title(self) -> &'static str {
        match self {
            Category::Blocked => "Blocked",
            Category::Shipped => "Shipped",
            Category::InReview => "In Review",
            Category::InProgress => "In Progress",
            Category::NotStarted => "Not Started",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One step of the classification cascade.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Ticket) -> bool,
    pub category: Category,
}

/// The cascade, evaluated top to bottom; the first rule that applies wins.
/// The last rule always applies.
pub const RULES: &[Rule] = &[
    Rule {
        name: "flagged",
        applies: |t| t.flagged,
        category: Category::Blocked,
    },
    Rule {
        name: "tracker-done",
        applies: |t| t.status_category_is("Done"),
        category: Category::Shipped,
    },
    Rule {
        name: "prs-merged",
        applies: |t| {
            !t.pull_requests.is_empty()
                && t.pull_requests.iter().all(|pr| !pr.is_open())
                && t.pull_requests.iter().any(|pr| pr.is_merged())
        },
        category: Category::Shipped,
    },
    Rule {
        name: "dev-merged",
        applies: |t| t.pull_requests.is_empty() && t.dev.reports_merged(),
        category: Category::Shipped,
    },
    Rule {
        name: "pr-open",
        applies: |t| t.pull_requests.iter().any(|pr| pr.is_open() && !pr.draft),
        category: Category::InReview,
    },
    Rule {
        name: "dev-open",
        applies: |t| t.pull_requests.is_empty() && t.dev.reports_open(),
        category: Category::InReview,
    },
    Rule {
        name: "tracker-in-progress",
        applies: |t| t.status_category_is("In Progress"),
        category: Category::InProgress,
    },
    Rule {
        name: "pr-draft",
        applies: |t| t.pull_requests.iter().any(|pr| pr.is_open() && pr.draft),
        category: Category::InProgress,
    },
    Rule {
        name: "branch-only",
        applies: |t| t.pull_requests.is_empty() && t.dev.pr_count == 0 && t.branch.is_some(),
        category: Category::InProgress,
    },
    Rule {
        name: "fallback",
        applies: |_| true,
        category: Category::NotStarted,
    },
];

/// A ticket with its bucket and the name of the rule that put it there.
#[derive(Debug, Clone)]
pub struct ClassifiedTicket {
    pub ticket: Ticket,
    pub category: Category,
    pub rule: &'static str,
}

/// Run the cascade for one ticket.
pub fn classify(ticket: &Ticket) -> (Category, &'static str) {
    RULES
        .iter()
        .find(|rule| (rule.applies)(ticket))
        .map(|rule| (rule.category, rule.name))
        .unwrap_or((Category::NotStarted, "fallback"))
}

/// Classify every ticket, consuming the enriched list.
#[instrument(skip_all, fields(tickets = tickets.len()))]
pub fn classify_all(tickets: Vec<Ticket>) -> Vec<ClassifiedTicket> {
    tickets
        .into_iter()
        .map(|ticket| {
            let (category, rule) = classify(&ticket);
            debug!(key = %ticket.key, category = %category, rule, "classified ticket");
            ClassifiedTicket { ticket, category, rule }
        })
        .collect()
}

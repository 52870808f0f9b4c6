use super::types::ReviewStatus;

const FAILING_CONCLUSIONS: &[&str] = &[
    "FAILURE",
    "ERROR",
    "CANCELLED",
    "TIMED_OUT",
    "ACTION_REQUIRED",
    "STARTUP_FAILURE",
];

const PASSING_CONCLUSIONS: &[&str] = &["SUCCESS", "NEUTRAL", "SKIPPED"];

/// Pass/fail aggregate over a pull request's checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksState {
    Passing,
    Failing,
    Pending,
}

/// Combined review outcome for an open, non-draft pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewLabel {
    ApprovedGreen,
    ChangesRequested,
    ChecksFailing,
    Pending,
}

impl std::fmt::Display for ReviewLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewLabel::ApprovedGreen => write!(f, "Approved, checks green"),
            ReviewLabel::ChangesRequested => write!(f, "Changes requested"),
            ReviewLabel::ChecksFailing => write!(f, "Checks failing"),
            ReviewLabel::Pending => write!(f, "Pending review"),
        }
    }
}

/// A check is failing if any conclusion is a failure, passing if every check
/// concluded cleanly (no checks counts as passing), pending otherwise.
pub fn checks_state(status: &ReviewStatus) -> ChecksState {
    let conclusions: Vec<String> = status
        .checks
        .iter()
        .map(|c| c.conclusion().unwrap_or("").to_ascii_uppercase())
        .collect();

    if conclusions.iter().any(|c| FAILING_CONCLUSIONS.contains(&c.as_str())) {
        ChecksState::Failing
    } else if conclusions.iter().all(|c| PASSING_CONCLUSIONS.contains(&c.as_str())) {
        ChecksState::Passing
    } else {
        ChecksState::Pending
    }
}

/// Combine the review decision with the checks aggregate.
/// A missing review entry is pending.
pub fn review_label(status: Option<&ReviewStatus>) -> ReviewLabel {
    let Some(status) = status else {
        return ReviewLabel::Pending;
    };
    let decision = status.decision.as_deref().unwrap_or("").to_ascii_uppercase();
    let checks = checks_state(status);

    if decision == "CHANGES_REQUESTED" {
        ReviewLabel::ChangesRequested
    } else if checks == ChecksState::Failing {
        ReviewLabel::ChecksFailing
    } else if decision == "APPROVED" && checks == ChecksState::Passing {
        ReviewLabel::ApprovedGreen
    } else {
        ReviewLabel::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::types::CheckRun;

    fn status(decision: Option<&str>, conclusions: &[Option<&str>]) -> ReviewStatus {
        ReviewStatus {
            decision: decision.map(str::to_string),
            checks: conclusions
                .iter()
                .map(|c| match c {
                    Some(c) => CheckRun::Conclusion(c.to_string()),
                    None => CheckRun::Run { conclusion: None },
                })
                .collect(),
        }
    }

    #[test]
    fn test_approved_and_green() {
        let s = status(Some("APPROVED"), &[Some("SUCCESS"), Some("skipped")]);
        assert_eq!(review_label(Some(&s)), ReviewLabel::ApprovedGreen);
    }

    #[test]
    fn test_approved_without_checks_is_green() {
        let s = status(Some("APPROVED"), &[]);
        assert_eq!(checks_state(&s), ChecksState::Passing);
        assert_eq!(review_label(Some(&s)), ReviewLabel::ApprovedGreen);
    }

    #[test]
    fn test_changes_requested_wins_over_failing_checks() {
        let s = status(Some("CHANGES_REQUESTED"), &[Some("FAILURE")]);
        assert_eq!(review_label(Some(&s)), ReviewLabel::ChangesRequested);
    }

    #[test]
    fn test_failing_checks_beat_approval() {
        let s = status(Some("APPROVED"), &[Some("SUCCESS"), Some("TIMED_OUT")]);
        assert_eq!(review_label(Some(&s)), ReviewLabel::ChecksFailing);
    }

    #[test]
    fn test_running_checks_are_pending() {
        let s = status(Some("APPROVED"), &[Some("SUCCESS"), None]);
        assert_eq!(checks_state(&s), ChecksState::Pending);
        assert_eq!(review_label(Some(&s)), ReviewLabel::Pending);
    }

    #[test]
    fn test_missing_entry_is_pending() {
        assert_eq!(review_label(None), ReviewLabel::Pending);
        assert_eq!(review_label(None).to_string(), "Pending review");
    }
}

use super::{keys, Heuristic, ObservationContext};
use crate::classify::{Category, ClassifiedTicket};

pub struct Unassigned;

impl Heuristic for Unassigned {
    fn name(&self) -> &str {
        "unassigned"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        let hits: Vec<&ClassifiedTicket> = ctx
            .tickets
            .iter()
            .filter(|t| t.ticket.assignee.is_none())
            .collect();
        (!hits.is_empty())
            .then(|| format!("{} ticket(s) are unassigned: {}", hits.len(), keys(hits)))
    }
}

pub struct Blocked;

impl Heuristic for Blocked {
    fn name(&self) -> &str {
        "blocked"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        let hits: Vec<&ClassifiedTicket> = ctx
            .tickets
            .iter()
            .filter(|t| t.category == Category::Blocked)
            .collect();
        (!hits.is_empty()).then(|| {
            format!(
                "{} ticket(s) are blocked and need attention: {}",
                hits.len(),
                keys(hits)
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_all;
    use crate::testutil::ticket;

    #[test]
    fn test_unassigned_and_blocked() {
        let mut a = ticket("HUM-1", "x");
        a.assignee = None;
        let mut b = ticket("HUM-2", "x");
        b.flagged = true;
        let tickets = classify_all(vec![a, b, ticket("HUM-3", "x")]);
        let ctx = ObservationContext {
            tickets: &tickets,
            delivered_pct: 0,
            elapsed_pct: 0,
            lag_threshold: 20,
        };
        assert_eq!(
            Unassigned.observe(&ctx).unwrap(),
            "1 ticket(s) are unassigned: HUM-1"
        );
        assert_eq!(
            Blocked.observe(&ctx).unwrap(),
            "1 ticket(s) are blocked and need attention: HUM-2"
        );
    }
}

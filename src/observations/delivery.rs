use super::{Heuristic, ObservationContext};

/// Delivery trails the calendar by more than the configured threshold.
pub struct DeliveryLag;

impl Heuristic for DeliveryLag {
    fn name(&self) -> &str {
        "delivery-lag"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        if ctx.tickets.is_empty() {
            return None;
        }
        let gap = ctx.elapsed_pct.saturating_sub(ctx.delivered_pct);
        (gap > ctx.lag_threshold).then(|| {
            format!(
                "Delivery is behind schedule: {}% shipped with {}% of the sprint elapsed ({} points behind).",
                ctx.delivered_pct, ctx.elapsed_pct, gap
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_all;
    use crate::testutil::ticket;

    fn observe(delivered_pct: u32, elapsed_pct: u32) -> Option<String> {
        let tickets = classify_all(vec![ticket("HUM-1", "a")]);
        DeliveryLag.observe(&ObservationContext {
            tickets: &tickets,
            delivered_pct,
            elapsed_pct,
            lag_threshold: 20,
        })
    }

    #[test]
    fn test_fires_above_threshold() {
        let line = observe(30, 60).unwrap();
        assert!(line.contains("30% shipped"));
        assert!(line.contains("60% of the sprint"));
    }

    #[test]
    fn test_silent_at_threshold() {
        assert!(observe(40, 60).is_none());
    }

    #[test]
    fn test_silent_when_ahead() {
        assert!(observe(90, 50).is_none());
    }

    #[test]
    fn test_silent_without_tickets() {
        let ctx = ObservationContext {
            tickets: &[],
            delivered_pct: 0,
            elapsed_pct: 100,
            lag_threshold: 20,
        };
        assert!(DeliveryLag.observe(&ctx).is_none());
    }
}

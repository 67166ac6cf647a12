use log::{debug, info};

use crate::helpers::normalize_symbol;
use crate::loader::{pending_status, LoadOutcome};
use crate::models::{DateRange, NodeSet, Status};

/// Identifies one requested load. Only the most recent ticket may apply
/// its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub symbol: String,
    pub range: DateRange,
}

/// Owns the displayed node set and status line.
#[derive(Debug, Default)]
pub struct Controller {
    nodes: Option<NodeSet>,
    status: Status,
    latest_seq: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> Option<&NodeSet> {
        self.nodes.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Single entry point for every load trigger.
    pub fn request_load(&mut self, raw_symbol: &str, range: DateRange) -> LoadTicket {
        self.latest_seq += 1;
        let symbol = normalize_symbol(raw_symbol);
        self.status = pending_status(&symbol, &range);
        info!("load #{} requested for {}", self.latest_seq, symbol);
        LoadTicket {
            seq: self.latest_seq,
            symbol,
            range,
        }
    }

    /// Applies `outcome` unless a newer load was requested after `ticket`.
    /// Returns whether the outcome was applied.
    pub fn complete(&mut self, ticket: &LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(
                "dropping stale load #{} for {} (latest is #{})",
                ticket.seq, ticket.symbol, self.latest_seq
            );
            return false;
        }
        self.nodes = Some(outcome.nodes);
        self.status = outcome.status;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{success_status, NodeSource};
    use crate::models::{parse_date, Node, NodeKind};

    fn range() -> DateRange {
        DateRange::trailing_days(parse_date("2025-10-30").unwrap(), 30)
    }

    fn outcome(symbol: &str, price: f64) -> LoadOutcome {
        LoadOutcome {
            symbol: symbol.to_string(),
            nodes: NodeSet::new(vec![Node::new(price, 1.0, NodeKind::Yellow)]).unwrap(),
            status: success_status(symbol, price, price),
            source: NodeSource::Live {
                min_price: price,
                max_price: price,
            },
        }
    }

    #[test]
    fn test_request_sets_pending_status() {
        let mut controller = Controller::new();
        let ticket = controller.request_load(" msft", range());
        assert_eq!(ticket.symbol, "MSFT");
        assert_eq!(ticket.seq, 1);
        assert_eq!(
            controller.status().message,
            "Fetching MSFT data from 2025-09-30 to 2025-10-30…"
        );
        assert!(controller.nodes().is_none());
    }

    #[test]
    fn test_empty_symbol_defaults() {
        let mut controller = Controller::new();
        assert_eq!(controller.request_load("", range()).symbol, "AAPL");
    }

    #[test]
    fn test_last_requested_wins() {
        let mut controller = Controller::new();
        let first = controller.request_load("AAPL", range());
        let second = controller.request_load("TSLA", range());

        // the newer request finishes first
        assert!(controller.complete(&second, outcome("TSLA", 250.0)));
        // the older one must not overwrite it
        assert!(!controller.complete(&first, outcome("AAPL", 230.0)));

        assert_eq!(controller.nodes().unwrap().latest().price, 250.0);
        assert!(controller.status().message.starts_with("TSLA"));
    }

    #[test]
    fn test_stale_completion_before_latest() {
        let mut controller = Controller::new();
        let first = controller.request_load("AAPL", range());
        let _second = controller.request_load("TSLA", range());

        assert!(!controller.complete(&first, outcome("AAPL", 230.0)));
        assert!(controller.nodes().is_none());
        assert!(controller.status().message.starts_with("Fetching TSLA"));
    }
}

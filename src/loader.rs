use log::{info, warn};
use rand::Rng;

use crate::errors::{Error, Result};
use crate::helpers::round_to_decimals;
use crate::models::{DateRange, Node, NodeKind, NodeSet, Status};
use crate::polygon::{AggregatesRequest, AggregatesResponse, AggregatesSource, DEMO_API_KEY};

pub const DEFAULT_NODE_COUNT: usize = 12;
/// Generated strengths fall in `[-STRENGTH_SPAN / 2, STRENGTH_SPAN / 2)`.
pub const STRENGTH_SPAN: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSource {
    Live { min_price: f64, max_price: f64 },
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub symbol: String,
    pub nodes: NodeSet,
    pub status: Status,
    pub source: NodeSource,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        self.source == NodeSource::Fallback
    }
}

/// `count` nodes evenly spaced over `[min_price, max_price]`, both ends
/// included. Strength and kind are drawn from `rng`.
///
/// A zero-width range keeps every node at `min_price`.
pub fn generate_nodes<R: Rng>(
    min_price: f64,
    max_price: f64,
    count: usize,
    rng: &mut R,
) -> Vec<Node> {
    let range = max_price - min_price;
    let steps = count.saturating_sub(1).max(1) as f64;

    (0..count)
        .map(|i| {
            let price = min_price + range * (i as f64 / steps);
            let strength = (rng.random::<f64>() - 0.5) * STRENGTH_SPAN;
            let kind = if rng.random::<f64>() > 0.5 {
                NodeKind::Yellow
            } else {
                NodeKind::Purple
            };
            Node::new(round_to_decimals(price, 2), round_to_decimals(strength, 1), kind)
        })
        .collect()
}

pub fn pending_status(symbol: &str, range: &DateRange) -> Status {
    Status::info(format!(
        "Fetching {} data from {} to {}…",
        symbol,
        range.from_param(),
        range.to_param()
    ))
}

pub fn success_status(symbol: &str, min_price: f64, max_price: f64) -> Status {
    Status::info(format!(
        "{} loaded successfully - Price range: ${:.2} → ${:.2}",
        symbol, min_price, max_price
    ))
}

pub fn fallback_status(symbol: &str, api_key: &str) -> Status {
    let mut message = format!("Could not load {} (API issue, key: {}). ", symbol, api_key);
    if api_key == DEMO_API_KEY {
        message.push_str(
            "Demo key works but has limits; get a free personal key at polygon.io for more data.",
        );
    } else {
        message.push_str("Check your key at polygon.io/dashboard/api-keys.");
    }
    message.push_str(" Showing demo nodes for now.");
    Status::error(message)
}

pub struct DataLoader<S> {
    source: S,
    node_count: usize,
}

impl<S: AggregatesSource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_node_count(source, DEFAULT_NODE_COUNT)
    }

    pub fn with_node_count(source: S, node_count: usize) -> Self {
        Self {
            source,
            node_count: node_count.max(2),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Loads nodes for `symbol`. Never fails: any error is logged and
    /// replaced by [`NodeSet::fallback`] with an error status.
    pub async fn load<R: Rng>(
        &self,
        symbol: &str,
        range: DateRange,
        rng: &mut R,
    ) -> LoadOutcome {
        match self.try_load(symbol, range, rng).await {
            Ok((nodes, min_price, max_price)) => {
                info!(
                    "{}: {} nodes over ${:.2} - ${:.2}",
                    symbol,
                    nodes.len(),
                    min_price,
                    max_price
                );
                LoadOutcome {
                    symbol: symbol.to_string(),
                    nodes,
                    status: success_status(symbol, min_price, max_price),
                    source: NodeSource::Live {
                        min_price,
                        max_price,
                    },
                }
            }
            Err(e) => {
                warn!("{}: falling back to demo nodes: {}", symbol, e);
                LoadOutcome {
                    symbol: symbol.to_string(),
                    nodes: NodeSet::fallback(),
                    status: fallback_status(symbol, self.source.api_key()),
                    source: NodeSource::Fallback,
                }
            }
        }
    }

    async fn try_load<R: Rng>(
        &self,
        symbol: &str,
        range: DateRange,
        rng: &mut R,
    ) -> Result<(NodeSet, f64, f64)> {
        let request = AggregatesRequest::new(symbol, range);
        let body = self.source.fetch_aggregates(&request).await?;
        let response: AggregatesResponse =
            serde_json::from_str(&body).map_err(|e| Error::JsonParse(e.to_string()))?;

        let closes = response.closes();
        if closes.is_empty() {
            return Err(Error::NoData {
                symbol: symbol.to_string(),
            });
        }

        let min_price = closes.iter().copied().fold(f64::INFINITY, f64::min);
        let max_price = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let nodes = NodeSet::new(generate_nodes(min_price, max_price, self.node_count, rng))?;
        Ok((nodes, min_price, max_price))
    }
}

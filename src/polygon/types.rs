use serde::Deserialize;

/// Envelope of `/v2/aggs/ticker/.../range/...`. Every field is optional: an
/// error body (bad key, unknown ticker) still parses and simply carries no
/// results.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregatesResponse {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results_count: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<AggregateBar>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AggregateBar {
    #[serde(rename = "o", default)]
    pub open: Option<f64>,
    #[serde(rename = "h", default)]
    pub high: Option<f64>,
    #[serde(rename = "l", default)]
    pub low: Option<f64>,
    #[serde(rename = "c", default)]
    pub close: Option<f64>,
    #[serde(rename = "v", default)]
    pub volume: Option<f64>,
    #[serde(rename = "t", default)]
    pub timestamp: Option<i64>,
}

impl AggregatesResponse {
    pub fn closes(&self) -> Vec<f64> {
        self.results
            .iter()
            .flatten()
            .filter_map(|bar| bar.close)
            .filter(|c| c.is_finite())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aggregates() {
        let body = r#"{
            "ticker": "AAPL",
            "queryCount": 3,
            "resultsCount": 3,
            "adjusted": true,
            "results": [
                {"v": 1.0e7, "vw": 230.1, "o": 229.0, "c": 231.5, "h": 232.0, "l": 228.4, "t": 1727668800000, "n": 10},
                {"v": 1.1e7, "o": 231.5, "c": 233.0, "h": 234.1, "l": 230.9, "t": 1727755200000},
                {"v": 0.9e7, "o": 233.0, "c": 229.9, "h": 233.2, "l": 229.0, "t": 1727841600000}
            ],
            "status": "OK",
            "request_id": "abc",
            "count": 3
        }"#;
        let resp: AggregatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.ticker.as_deref(), Some("AAPL"));
        assert_eq!(resp.results_count, Some(3));
        assert_eq!(resp.closes(), vec![231.5, 233.0, 229.9]);
    }

    #[test]
    fn test_error_body_has_no_closes() {
        let body = r#"{"status":"ERROR","request_id":"x","error":"Unknown API Key"}"#;
        let resp: AggregatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Unknown API Key"));
        assert!(resp.closes().is_empty());
    }

    #[test]
    fn test_bars_without_close_are_skipped() {
        let body = r#"{"results":[{"o":1.0},{"c":2.5}]}"#;
        let resp: AggregatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.closes(), vec![2.5]);
    }
}

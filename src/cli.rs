use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::helpers::DEFAULT_SYMBOL;
use crate::loader::DEFAULT_NODE_COUNT;
use crate::models::{parse_date, DateRange};
use crate::polygon::{DEFAULT_BASE_URL, DEMO_API_KEY};
use crate::render::Size;

pub const DEFAULT_REFERENCE_DATE: &str = "2025-10-30";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Ticker symbol, case-insensitive
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    #[arg(long, env = "POLYGON_API_KEY", default_value = DEMO_API_KEY, hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of days before the reference date to fetch
    #[arg(short, long, default_value_t = 30)]
    pub days: u32,

    /// Last day of the fetched range (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_REFERENCE_DATE, value_parser = parse_reference_date)]
    pub reference_date: chrono::NaiveDate,

    /// Nodes generated per load
    #[arg(short, long, default_value_t = DEFAULT_NODE_COUNT, value_parser = parse_node_count)]
    pub nodes: usize,

    /// Seed for strength/type generation
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    #[arg(long, default_value_t = 500.0)]
    pub height: f64,

    #[arg(short, long, default_value = "15s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Interactive mode: write logs here instead of the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Snapshot mode: SVG output path
    #[arg(short, long, default_value = "heatmap.svg")]
    pub out: PathBuf,

    /// Snapshot mode: also write the nodes as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Args {
    pub fn date_range(&self) -> DateRange {
        DateRange::trailing_days(self.reference_date, self.days)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    pub secs: u64,
}

impl Duration {
    pub fn as_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.secs)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} seconds", self.secs)
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, String> {
    if let Some(stripped) = s.strip_suffix('s') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num })
    } else if let Some(stripped) = s.strip_suffix('m') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num * 60 })
    } else if let Some(stripped) = s.strip_suffix('h') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num * 3600 })
    } else {
        Err("Invalid duration format. Use formats like 1s, 3m, or 1h.".into())
    }
}

fn parse_reference_date(s: &str) -> Result<chrono::NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn parse_node_count(s: &str) -> Result<usize, String> {
    let n = usize::from_str(s).map_err(|e| e.to_string())?;
    if n < 2 {
        return Err("At least 2 nodes are needed to span a price range.".into());
    }
    Ok(n)
}

//! Builds the dashboard view of a saved analysis response, without a server.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::path::PathBuf;

use trends_dashboard::analysis::{AnalyzeEnvelope, StrategyPayload};
use trends_dashboard::dashboard::DashboardView;

#[derive(Parser, Debug)]
struct CliArgs {
    /// JSON file holding either a full service response or a bare strategy payload.
    pub path: PathBuf,

    /// Seed for the view growth curves; random when omitted.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Pretty-print the output.
    #[clap(long)]
    pub pretty: bool,
}

/// Accepts `{"data": {"marketing_strategy": ...}}` as well as the strategy itself.
fn parse_payload(value: Value) -> Result<StrategyPayload> {
    if value.get("data").is_some() {
        let envelope: AnalyzeEnvelope =
            serde_json::from_value(value).context("Invalid analysis response envelope")?;
        return Ok(envelope.data.marketing_strategy);
    }
    serde_json::from_value(value).context("Invalid strategy payload")
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let content = std::fs::read_to_string(&cli_args.path)
        .with_context(|| format!("Failed to read {:?}", cli_args.path))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {:?}", cli_args.path))?;
    let payload = parse_payload(value)?;

    let view = match cli_args.seed {
        Some(seed) => DashboardView::build(&payload, &mut StdRng::seed_from_u64(seed)),
        None => DashboardView::build(&payload, &mut rand::rng()),
    };

    let output = if cli_args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{}", output);

    Ok(())
}

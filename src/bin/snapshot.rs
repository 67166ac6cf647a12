use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use nodeheat::{
    cli::Args,
    helpers::normalize_symbol,
    loader::{pending_status, DataLoader},
    polygon::PolygonClient,
    render::{HeatmapRenderer, SvgSurface},
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let symbol = normalize_symbol(&args.symbol);
    let range = args.date_range();
    println!("{}", pending_status(&symbol, &range));

    let client = PolygonClient::new(&args.base_url, &args.api_key, args.timeout.as_std())?;
    let loader = DataLoader::with_node_count(client, args.nodes);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let outcome = loader.load(&symbol, range, &mut rng).await;

    if outcome.status.is_error {
        eprintln!("{}", outcome.status);
    } else {
        println!("{}", outcome.status);
    }

    let mut svg = SvgSurface::new(args.canvas_size());
    HeatmapRenderer.render(&outcome.nodes, &mut svg);
    std::fs::write(&args.out, svg.finish())?;
    info!("Wrote {} nodes to {}", outcome.nodes.len(), args.out.display());

    if let Some(path) = &args.json {
        std::fs::write(path, serde_json::to_string_pretty(&outcome.nodes)?)?;
        info!("Wrote node JSON to {}", path.display());
    }
    Ok(())
}

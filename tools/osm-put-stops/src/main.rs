use anyhow::{bail, Context, Result};
use clap::Parser;
use put_stops::{cluster_stops, ExtractOptions, MembershipMatching};
use std::path::PathBuf;

mod output;
mod pbf;

use output::{write_clusters, write_stops, write_stops_points};
use pbf::extract_stops;

#[derive(Parser, Debug)]
#[command(
    name = "osm-put-stops",
    author,
    version,
    about = "Extract public transport stops from OpenStreetMap PBF data",
    long_about = "Resolves platforms, stop positions and stations from OSM PBF files \
                  in three passes (relations, ways, nodes) and writes one CSV row per stop.\n\n\
                  Each stop carries its classification, the best-ranked route serving it \
                  and the name of its stop area. Ways and relations are positioned at the \
                  mean of their node coordinates."
)]
struct Args {
    /// Input OSM PBF file
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV file for stops
    #[arg(short, long)]
    output: PathBuf,

    /// Also output locatable stops as GeoJSON points to this file
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Also output stop clusters (grouped by stop area and type) to this CSV file
    #[arg(long)]
    clusters: Option<PathBuf>,

    /// Match route and stop-area members by id alone, ignoring the element kind
    #[arg(long)]
    match_by_id: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== OSM Public Transport Stops ===");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let options = ExtractOptions {
        matching: if args.match_by_id {
            MembershipMatching::ById
        } else {
            MembershipMatching::ByReference
        },
    };
    log::debug!("Membership matching: {:?}", options.matching);

    // Phase 1: Resolve stops
    log::info!("");
    log::info!("Phase 1: Resolving stops (relations, ways, nodes)...");
    let table = extract_stops(&args.input, options).context("Failed to extract stops from PBF")?;

    // Phase 2: Write output
    log::info!("");
    log::info!("Phase 2: Writing output...");
    write_stops(&table, &args.output).context("Failed to write stop table")?;

    if let Some(geojson_path) = &args.geojson {
        write_stops_points(&table, geojson_path).context("Failed to write stop points")?;
    }

    if let Some(clusters_path) = &args.clusters {
        let clusters = cluster_stops(&table);
        write_clusters(&clusters, clusters_path).context("Failed to write stop clusters")?;
    }

    // Summary
    log::info!("");
    table.stats().log_summary();
    log::info!("");
    log::info!("Output written to: {}", args.output.display());
    log::info!("Done!");

    Ok(())
}

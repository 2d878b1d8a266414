//! strides: grow a running route that completes as many named streets as
//! possible.
//!
//! ```text
//! strides --demo -o ./output
//! strides bangkok.json --start-node 702209198 --target-km 21.1 -o ./output
//! strides bangkok.json --lat 13.7563 --lon 100.5018 -d 10 --hot-spots
//! strides bangkok.json --config route.json --budget 10
//! ```
//!
//! While the route grows, `route.csv` in the output directory always holds the
//! latest snapshot (`lat,lon,sz,names,len_cat`), ready for a map viewer.

mod logging;
mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser};

use strides_core::{DistanceMetric, GeoPoint, OsmId, RouteConfig, StartPoint, UnnamedPolicy};
use strides_graph::{Element, StreetGraph, StreetGraphBuilder, completed_streets, load_overpass_path};
use strides_output::{CsvWriter, PathOutputObserver};
use strides_search::RouteGrower;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "strides", version, about = "Grow a running route that completes named streets")]
struct Cli {
    /// Overpass JSON extracts (`.osm.pbf` too with the `osm` feature).
    /// Several extracts are merged.
    #[arg(value_name = "EXTRACT", required_unless_present = "demo")]
    inputs: Vec<PathBuf>,

    /// Run on the built-in synthetic grid.
    #[arg(long, conflicts_with = "inputs")]
    demo: bool,

    /// JSON route configuration; flags below override its fields.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// OSM id of the start node.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    start_node: Option<i64>,

    /// Start latitude; snapped to the nearest node.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Start longitude; snapped to the nearest node.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Route length to reach, in kilometres.
    #[arg(short = 'd', long)]
    target_km: Option<f64>,

    /// Intersections each search may branch at.
    #[arg(long)]
    budget: Option<u32>,

    /// Widest budget tried before giving up on a step.
    #[arg(long)]
    max_budget: Option<u32>,

    /// Nodes dropped from the end of each accepted step.
    #[arg(long)]
    tail_trim: Option<usize>,

    /// `planar` (fast) or `geodesic` (haversine).
    #[arg(long)]
    metric: Option<DistanceMetric>,

    #[arg(long)]
    max_iterations: Option<u32>,

    /// Queue pops per search before it stops expanding.
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Steer toward the densest cluster of unfinished streets.
    #[arg(long)]
    hot_spots: bool,

    /// Drop unnamed ways instead of walking them.
    #[arg(long)]
    skip_unnamed: bool,

    /// Output directory for `route.csv` and `steps.csv`.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Warnings and errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Prefix log lines with a timestamp.
    #[arg(long)]
    log_timestamps: bool,
}

impl Cli {
    fn start_point(&self) -> Option<StartPoint> {
        match (self.start_node, self.lat, self.lon) {
            (Some(id), _, _) => Some(StartPoint::Node(OsmId(id))),
            (None, Some(lat), Some(lon)) => Some(StartPoint::Coordinate(GeoPoint::new(lat, lon))),
            _ => None,
        }
    }

    /// Configuration file (if any) with command-line overrides applied.
    fn route_config(&self) -> Result<RouteConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => {
                let start = self
                    .start_point()
                    .or(self.demo.then_some(StartPoint::Node(network::DEMO_START)))
                    .ok_or_else(|| anyhow!("a start is required: --start-node or --lat/--lon"))?;
                let target = self
                    .target_km
                    .or(self.demo.then_some(network::DEMO_TARGET_KM))
                    .ok_or_else(|| anyhow!("--target-km is required"))?;
                RouteConfig::new(start, target)
            }
        };

        if let Some(start) = self.start_point() {
            config.start = start;
        }
        if let Some(km) = self.target_km {
            config.target_km = km;
        }
        if let Some(budget) = self.budget {
            config = config.with_branch_budget(budget);
        }
        if let Some(max) = self.max_budget {
            config.max_branch_budget = max;
        }
        if let Some(trim) = self.tail_trim {
            config.tail_trim = trim;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(n) = self.max_iterations {
            config.max_iterations = n;
        }
        if let Some(n) = self.max_expansions {
            config.max_expansions = n;
        }
        if self.hot_spots {
            config.hot_spot_bias = true;
        }
        if self.skip_unnamed {
            config.unnamed = UnnamedPolicy::Skip;
        }

        config.validate()?;
        Ok(config)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn load_elements(path: &Path) -> Result<Vec<Element>> {
    let is_pbf = path.extension().is_some_and(|ext| ext == "pbf");

    #[cfg(feature = "osm")]
    if is_pbf {
        return strides_graph::osm::load_elements_from_pbf(path)
            .with_context(|| format!("reading {}", path.display()));
    }
    if is_pbf {
        bail!("{}: PBF input needs the `osm` feature", path.display());
    }

    load_overpass_path(path).with_context(|| format!("reading {}", path.display()))
}

fn build_graph(cli: &Cli, unnamed: UnnamedPolicy) -> Result<StreetGraph> {
    let mut builder = StreetGraphBuilder::with_policy(unnamed);
    if cli.demo {
        builder.extend(network::demo_elements());
    }
    for path in &cli.inputs {
        builder.extend(load_elements(path)?);
    }
    log::info!("{} nodes, {} ways loaded", builder.node_count(), builder.way_count());
    Ok(builder.build()?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(logging::level_for(cli.verbose, cli.quiet), cli.log_timestamps)?;

    let config = cli.route_config()?;

    let t0 = Instant::now();
    let graph = build_graph(&cli, config.unnamed)?;
    println!(
        "Street graph: {} nodes, {} edges, {} named streets ({:.2?})",
        graph.node_count(),
        graph.edge_count(),
        graph.named_street_count(),
        t0.elapsed()
    );

    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("creating output in {}", cli.output.display()))?;
    let mut observer = PathOutputObserver::new(writer);

    let t1 = Instant::now();
    let report = RouteGrower::new(&graph, config)?.plan(&mut observer)?;
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing route output");
    }

    println!();
    println!("Route:      {:.2} km, {} nodes", report.total_km, report.path.len());
    println!("Completed:  {} streets", report.streets_completed);
    println!("Iterations: {} ({:?}) in {:.2?}", report.iterations, report.termination, t1.elapsed());
    for street in completed_streets(&graph, &report.path) {
        println!("  - {}", street.name);
    }
    println!("Snapshot:   {}", cli.output.join(strides_output::csv::SNAPSHOT_FILE).display());

    Ok(())
}

//! yacluster - Cluster labeled points from a JSON file
//!
//! Reads a JSON array of points, either `{"x": .., "y": .., "id": ..}`
//! objects or `[[x, y], id]` pairs, and writes a JSON array of
//! `{"centroid": [x, y], "members": [..]}` clusters.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use yacluster_core::{Cluster, ClusterParams, Point, cluster_with_params, ensure_unique_ids};

/// Point identity as it appears in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum PointId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputPoint {
    Object { x: f64, y: f64, id: PointId },
    Pair((f64, f64), PointId),
}

impl From<InputPoint> for Point<PointId> {
    fn from(p: InputPoint) -> Self {
        match p {
            InputPoint::Object { x, y, id } => Point::new((x, y), id),
            InputPoint::Pair(coords, id) => Point::new(coords, id),
        }
    }
}

#[derive(Debug, Serialize)]
struct OutputCluster {
    centroid: (f64, f64),
    members: Vec<PointId>,
}

impl From<Cluster<PointId>> for OutputCluster {
    fn from(c: Cluster<PointId>) -> Self {
        let (centroid, members) = c.into_parts();
        Self { centroid, members }
    }
}

/// Group points so that each is closer than a threshold to the centroid of
/// the cluster it joined.
#[derive(Parser, Debug)]
#[command(name = "yacluster")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON array of points, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Maximum distance between a point and the centroid it joins
    #[arg(short = 't', long)]
    threshold: f64,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_points(reader: impl Read) -> Result<Vec<Point<PointId>>> {
    let raw: Vec<InputPoint> =
        serde_json::from_reader(BufReader::new(reader)).context("invalid point list")?;
    Ok(raw.into_iter().map(Point::from).collect())
}

fn run(points: Vec<Point<PointId>>, params: ClusterParams) -> Result<Vec<OutputCluster>> {
    ensure_unique_ids(&points)?;
    let clusters = cluster_with_params(points, params)?;
    Ok(clusters.into_iter().map(OutputCluster::from).collect())
}

fn write_clusters(writer: impl Write, clusters: &[OutputCluster], pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, clusters)?;
    } else {
        serde_json::to_writer(&mut writer, clusters)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    let params = ClusterParams::new(args.threshold)?;

    let points = if args.input == "-" {
        read_points(io::stdin().lock())?
    } else {
        let path = PathBuf::from(&args.input);
        let file =
            File::open(&path).with_context(|| format!("cannot open {}", path.display()))?;
        read_points(file).with_context(|| format!("reading {}", path.display()))?
    };
    debug!(points = points.len(), "input loaded");

    let clusters = run(points, params)?;
    info!(clusters = clusters.len(), "clustering done");

    if args.outfile == "-" {
        write_clusters(io::stdout().lock(), &clusters, args.pretty)
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        write_clusters(file, &clusters, args.pretty)
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = process(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// cargo run --bin orbit-path --release -- --tle stations.tle --satcat-id 25544 --segments 256 /tmp/iss_path.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use orbit_types::prelude::{OrbitalRecord, SatelliteId};
use satviz_lib::{catalog::load_into, orbit_path::orbit_path, scene::Scene};

/// Write one revolution of a satellite's orbit as 'x y z' scene coordinates
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scene configuration toml file.
    ///
    /// The default nominal scene is used when not provided.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Satellite catalog JSON document
    #[arg(long)]
    catalog: Vec<PathBuf>,

    /// Three-line TLE set file
    #[arg(long)]
    tle: Vec<PathBuf>,

    /// Satcat ID
    #[arg(short = 'i', long)]
    satcat_id: u64,

    /// Number of path segments, defaults to the scene's orbit-segments
    #[arg(short = 's', long)]
    segments: Option<usize>,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let now = chrono::Utc::now();
    let scene = Scene::load(opts.scene.as_ref(), now)?;
    let mut tracker = scene.tracker();
    load_into(&mut tracker, &opts.catalog, &opts.tle, now)?;

    let id = SatelliteId::new(opts.satcat_id);
    let obj = tracker
        .get(id)
        .ok_or_else(|| format!("Satellite {id} is not in the scene or the loaded catalogs"))?;
    let OrbitalRecord::Elements(elements) = &obj.record else {
        return Err(
            format!("Satellite {id} only has a reported position, not orbital elements").into(),
        );
    };

    let orbit = tracker.propagator().orbit(elements)?;
    let path = orbit_path(&orbit, opts.segments.unwrap_or(scene.orbit_segments));

    let mut output = File::create(opts.output)?;
    for p in path {
        writeln!(&mut output, "{} {} {}", p.x, p.y, p.z)?;
    }

    Ok(())
}

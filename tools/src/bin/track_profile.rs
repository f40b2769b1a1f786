// cargo run --bin track-profile --release -- --tle stations.tle --satcat-id 25544 --duration 3h --dt 30s /tmp/iss_track.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use orbit_types::prelude::{SatelliteId, UtcTimestamp};
use satviz_lib::{
    catalog::load_into,
    scene::Scene,
    units::{Time, Timestamp},
};

/// Write a satellite's scene position over time as 't x y z radius'
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

    /// Start time (RFC 3339), defaults to the satellite's epoch
    #[arg(long)]
    start: Option<UtcTimestamp>,

    /// Duration, e.g. '90m'
    #[arg(short = 'd', long)]
    duration: humantime::Duration,

    /// Time step (dt), e.g. '10s'
    #[arg(short = 't', long)]
    dt: humantime::Duration,

    /// Use absolute UTC timestamp seconds instead of relative
    #[arg(short = 'a', long)]
    abs_time: bool,

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
        .ok_or_else(|| format!("Satellite {id} is not in the scene or the loaded catalogs"))?
        .clone();

    let dt = Time::from_secs(opts.dt.as_secs_f64());
    if dt.as_secs() <= 0.0 {
        return Err("dt must be greater than zero".into());
    }
    let duration = Time::from_secs(opts.duration.as_secs_f64());

    let t0 = Timestamp::from_utc(opts.start.unwrap_or_else(|| obj.record.reference_time()));
    let mut output = File::create(opts.output)?;
    let mut time = Time::from_secs(0.0);

    loop {
        if time.as_secs() > duration.as_secs() {
            break;
        }

        let at = t0 + time;
        let (p, _) = tracker.locate(&obj, at)?;

        let t = if opts.abs_time {
            at.as_millis() as f64 / 1000.0
        } else {
            time.as_secs()
        };
        writeln!(&mut output, "{} {} {} {} {}", t, p.x, p.y, p.z, p.norm())?;

        time += dt;
    }

    Ok(())
}

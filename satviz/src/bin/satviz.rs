use clap::Parser;
use orbit_protocol::{parse_live_message, LiveMessage};
use orbit_types::prelude::*;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use satviz_lib::{
    catalog::{load_into, load_positions_file},
    clock::PlaybackClock,
    geodesy::check_sample,
    scene::Scene,
    tracker::Frame,
    units::Timestamp,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scene configuration toml file.
    ///
    /// The default nominal scene is used when not provided.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Satellite catalog JSON document, paginated or a bare array
    #[arg(long)]
    catalog: Vec<PathBuf>,

    /// Three-line TLE set file
    #[arg(long)]
    tle: Vec<PathBuf>,

    /// Positions JSON document, applied before the first frame
    #[arg(long)]
    positions: Vec<PathBuf>,

    /// Live feed replay file, one JSON message per line
    #[arg(long)]
    live: Option<PathBuf>,

    /// Playback start time (RFC 3339), defaults to now
    #[arg(long)]
    at: Option<UtcTimestamp>,

    /// Number of frames to compute, runs until Ctrl-C when not provided
    #[arg(long)]
    frames: Option<u64>,

    /// Overrides the scene's time scale factor
    #[arg(long)]
    time_scale: Option<f64>,

    /// Compute frames back to back instead of pacing them at the frame rate
    #[arg(long)]
    no_wait: bool,

    /// Report the closest object to this 'lat,lon,alt_km' every frame
    #[arg(long, value_parser = parse_observer)]
    observer: Option<Observer>,
}

#[derive(Copy, Clone, Debug)]
struct Observer {
    latitude: f64,
    longitude: f64,
    altitude_km: f64,
}

fn parse_observer(s: &str) -> Result<Observer, String> {
    let fields = s
        .split(',')
        .map(|f| f.trim().parse::<f64>().map_err(|e| format!("'{f}': {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    let [latitude, longitude, altitude_km] = fields[..] else {
        return Err("expected 'lat,lon,alt_km'".to_owned());
    };
    let observer = Observer {
        latitude,
        longitude,
        altitude_km,
    };
    check_sample(&observer.sample(UtcTimestamp::default())).map_err(|e| e.to_string())?;
    Ok(observer)
}

impl Observer {
    fn sample(&self, timestamp: UtcTimestamp) -> GeodeticSample {
        GeodeticSample::new(self.latitude, self.longitude, self.altitude_km, timestamp)
    }
}

fn frames_done(limit: Option<u64>, computed: u64) -> bool {
    limit.map(|n| computed >= n).unwrap_or(false)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let intr = interruptor::Interruptor::new();
    let intr_clone = intr.clone();
    ctrlc::set_handler(move || {
        if intr_clone.is_set() {
            let exit_code = if cfg!(target_family = "unix") {
                // 128 (fatal error signal "n") + 2 (control-c is fatal error signal 2)
                130
            } else {
                // Windows code 3221225786
                // -1073741510 == C000013A
                -1073741510
            };
            std::process::exit(exit_code);
        } else {
            intr_clone.set();
        }
    })?;

    let start = opts.at.unwrap_or_else(chrono::Utc::now);

    let mut scene = Scene::load(opts.scene.as_ref(), start)?;
    if let Some(time_scale) = opts.time_scale {
        scene.propagator_config.time_scale = time_scale;
    }

    let mut tracker = scene.tracker();
    load_into(&mut tracker, &opts.catalog, &opts.tle, start)?;
    for path in opts.positions.iter() {
        for p in load_positions_file(path)?.iter() {
            tracker.apply_position(p);
        }
    }
    info!(objects = tracker.len(), "Tracking");

    let mut live = match opts.live.as_ref() {
        Some(p) => read_live_feed(p)?,
        None => VecDeque::new(),
    };

    let observer = opts.observer.map(|o| o.sample(start));

    let frame_period = scene.frame_period();
    let mut clock = PlaybackClock::new(Timestamp::from_utc(start));

    loop {
        if intr.is_set() || frames_done(opts.frames, clock.frame) {
            break;
        }

        // Replay everything that has happened by now. Messages without a
        // timestamp go out right after whatever precedes them.
        while let Some(msg) = live.front() {
            match message_time(msg) {
                Some(t) if t > *clock.timestamp.as_utc() => break,
                _ => (),
            }
            if let Some(msg) = live.pop_front() {
                tracker.apply(&msg);
            }
        }

        let frame = tracker.frame(clock.timestamp);
        print_frame(&frame);

        if let Some(observer) = observer.as_ref() {
            match tracker.closest_to(&frame, observer) {
                Ok(Some((id, d))) => println!("  closest: {id} at {:.1} km", d.as_kilometers()),
                Ok(None) => println!("  closest: none"),
                Err(e) => warn!(error = %e, "Nearest object unavailable"),
            }
        }

        if frames_done(opts.frames, clock.frame + 1) {
            break;
        }

        if !opts.no_wait {
            std::thread::sleep(Duration::from_secs_f64(frame_period.as_secs()));
        }
        clock.advance(frame_period);
    }

    println!("Stopped at\n{clock:#?}");

    Ok(())
}

fn read_live_feed(path: &Path) -> Result<VecDeque<LiveMessage>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut msgs = VecDeque::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_live_message(&line) {
            Ok(msg) => msgs.push_back(msg),
            Err(e) => warn!(line = idx + 1, error = %e, "Skipping malformed live message"),
        }
    }
    info!(feed = %path.display(), messages = msgs.len(), "Loaded live feed");
    Ok(msgs)
}

fn message_time(msg: &LiveMessage) -> Option<UtcTimestamp> {
    match msg {
        LiveMessage::Position(p) => Some(p.timestamp),
        LiveMessage::Status(s) => s.timestamp,
        LiveMessage::Heartbeat | LiveMessage::Unsupported(_) => None,
    }
}

fn print_frame(frame: &Frame) {
    println!("TIME: {}", frame.timestamp);
    for p in frame.positions.iter() {
        println!("  {} {} [{}] {}", p.id, p.kind, p.source, p.position);
    }
    if !frame.skipped.is_empty() {
        println!("  skipped: {}", frame.skipped.len());
    }
}

mod interruptor {
    use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    #[repr(transparent)]
    pub struct Interruptor(Arc<AtomicBool>);

    impl Interruptor {
        pub fn new() -> Self {
            Interruptor(Arc::new(AtomicBool::new(false)))
        }

        pub fn set(&self) {
            self.0.store(true, SeqCst);
        }

        pub fn is_set(&self) -> bool {
            self.0.load(SeqCst)
        }
    }

    impl Default for Interruptor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_argument() {
        let o = parse_observer("51.5, -0.1, 0.05").unwrap();
        assert_eq!(o.latitude, 51.5);
        assert_eq!(o.longitude, -0.1);
        assert_eq!(o.altitude_km, 0.05);

        assert!(parse_observer("51.5,-0.1").is_err());
        assert!(parse_observer("91,0,0").is_err());
        assert!(parse_observer("0,0,nan").is_err());
        assert!(parse_observer("0,0,inf").is_err());
    }

    #[test]
    fn frame_limit() {
        assert!(frames_done(Some(0), 0));
        assert!(!frames_done(Some(3), 2));
        assert!(frames_done(Some(3), 3));
        assert!(!frames_done(None, u64::MAX));
    }
}

use anyhow::Context;
use clap::Parser;
use generator::profile::{build_track, TrackConfig};
use gui_bridge::bridge::GuiBridge;
use radarcore::radar::RadarEvent;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ConsoleConfig;
use workflow::runner::{ConsoleSession, Runner};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Vehicle radar console driver")]
struct Args {
    /// Replay a synthetic track once and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load the console config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 5)]
    rings: u32,
    #[arg(long, default_value_t = 10.0)]
    multiplier: f64,
    #[arg(long, default_value_t = 100.0)]
    initial_domain: f64,
    /// Number of synthetic fixes to generate
    #[arg(long, default_value_t = 120)]
    fixes: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Draw only the newest fix instead of the trail
    #[arg(long, default_value_t = false)]
    beacon: bool,
    /// Host the HTTP bridge and replay the track at one fix per interval
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut console_config = if let Some(path) = args.workflow {
        ConsoleConfig::load(path)?
    } else {
        ConsoleConfig::from_args(args.rings, args.multiplier, args.initial_domain)
    };
    console_config.beacon |= args.beacon;

    let track_config = TrackConfig {
        fixes: args.fixes,
        seed: args.seed,
        start_longitude: console_config.center_longitude,
        start_latitude: console_config.center_latitude,
        ..Default::default()
    };
    let track = build_track(&track_config)?;

    if args.offline {
        let runner = Runner::new(console_config.clone());
        let result = runner.execute(&track)?;

        println!(
            "Offline run -> fixes {}, visible {}, domain {} m, re-projections {}, rejected {}",
            result.history_len,
            result.snapshot.points.len(),
            result.snapshot.domain,
            result.metrics.reprojections,
            result.metrics.rejected
        );

        let report = format!(
            "fixes={} visible={} domain={} rings={:?} transform={:?}\n",
            result.history_len,
            result.snapshot.points.len(),
            result.snapshot.domain,
            result.snapshot.ring_distances,
            result.snapshot.transform
        );
        let report_path = PathBuf::from("tools/data/offline_radar.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        let session = ConsoleSession::new(&console_config)?;
        let gui_bridge = GuiBridge::new(Arc::new(Mutex::new(session)));
        gui_bridge.submit(RadarEvent::NewCenter(console_config.center()))?;
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");

        let interval = Duration::from_secs_f64(track_config.interval_s);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for track replay")?;
        runtime.block_on(async {
            let replay = async {
                let mut ticker = tokio::time::interval(interval);
                for fix in &track {
                    ticker.tick().await;
                    gui_bridge.submit(RadarEvent::NewPosition(*fix))?;
                }
                gui_bridge.publish_status("Track replay finished.");
                std::future::pending::<anyhow::Result<()>>().await
            };
            tokio::select! {
                result = replay => result,
                signal = signal::ctrl_c() => signal.context("awaiting Ctrl+C to exit"),
            }
        })?;
    }

    Ok(())
}

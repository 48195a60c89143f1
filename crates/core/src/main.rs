use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, warn};

use tatami_core::config::{validator, ConfigLoader};
use tatami_core::event_loop;
use tatami_core::window_manager::{monitor, WindowManager, WmEvent};

#[derive(Debug, Parser)]
#[command(name = "tatami", about = "A master/stack tiling window manager for Windows")]
struct Args {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an explicit config file instead of the per-user location
    #[arg(long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("starting tatami");

    // The handler must only wake the loop; all teardown happens on the
    // loop thread after the pump returns.
    ctrlc::set_handler(|| {
        info!("interrupt received, shutting down");
        event_loop::stop();
    })?;

    let loader = match args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new()?,
    };
    let mut config = match loader.load() {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            warn!("continuing with the default configuration");
            Default::default()
        }
    };
    validator::validate(&mut config);

    let monitors = monitor::detect_monitors()?;
    info!("detected {} monitor(s)", monitors.len());

    let mut wm = WindowManager::new(&config, monitors)?;
    wm.subscribe(Box::new(|event| match event {
        WmEvent::WindowAdded(id) => info!("managed {}", id),
        WmEvent::WindowRemoved(id) => info!("unmanaged {}", id),
        event => debug!("event: {:?}", event),
    }));

    // Blocks until a quit command, Ctrl+C, or an OS quit message.
    event_loop::run(&mut wm)?;

    wm.shutdown();
    info!("tatami stopped");
    Ok(())
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "tatami_core=info",
        1 => "tatami_core=debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

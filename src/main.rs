#![forbid(unsafe_code)]

mod cli;
mod codec;
mod commands;
mod config;
mod constants;
mod controller;
mod error;
mod geometry;
mod interaction;
mod location;
mod names;
mod store;
mod venue;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use commands::Session;
use config::Config;
use controller::ListController;
use location::FileLocation;
use store::FileStore;
use venue::VenueData;

fn parse_log_level(level: &str, verbose: u8) -> TraceLevel {
    match verbose {
        0 => {}
        1 => return TraceLevel::DEBUG,
        _ => return TraceLevel::TRACE,
    }
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(dataset) = cli.dataset {
        config.dataset = Some(dataset);
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(&config.log_level, cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = FileStore::open(config.storage_path());
    let location = FileLocation::open(config.location_path());
    info!(store = %store.path().display(), location = %location.path().display(), "Opened session");

    // Dataset problems leave the map unusable but lists still work
    let venue = config.dataset.as_deref().and_then(|path| {
        VenueData::load(path)
            .inspect_err(|err| error!("failed to load venue dataset: err={err:#}"))
            .ok()
    });

    let mut controller = ListController::new(store, location);
    controller.initialize();

    let mut session = Session {
        controller,
        venue,
        config,
    };
    session.run(cli.command)
}

use clap::Parser;
use navgraph::SampleApp;
use navgraph::core::config::{self, CliOverrides};
use navgraph::core::location::Coordinate;
use navgraph::graphs::{Crane, Jetsnack};
use navgraph::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;

#[derive(Parser)]
#[command(
    name = "navgraph",
    about = "Navigation graphs of the Crane and Jetsnack samples, in the terminal"
)]
struct Args {
    /// Sample app to run
    #[arg(short, long, value_enum)]
    app: Option<SampleApp>,

    /// Device location as "latitude,longitude" (the map falls back to a fixed point without one)
    #[arg(short, long)]
    location: Option<Coordinate>,

    /// Start fresh instead of restoring the last session
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config =
        config::load_config().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            app: args.app,
            location: args.location,
            fresh: args.fresh,
        },
    );

    // Initialize file logger - writes to navgraph.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("navgraph.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Navgraph starting up: {:?}, splash {}ms, restore {}",
        resolved.app,
        resolved.splash_duration.as_millis(),
        resolved.restore_session
    );

    match resolved.app {
        SampleApp::Crane => tui::run::<Crane>(resolved),
        SampleApp::Jetsnack => tui::run::<Jetsnack>(resolved),
    }
}

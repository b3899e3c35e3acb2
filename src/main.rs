use anyhow::{Context, Result};
use argh::FromArgs;
use std::path::PathBuf;
use tracing::{debug, error, info};
use vgdash::models::load_locations;
use vgdash::{Dashboard, DashboardConfig, DashboardKind, Endpoints, HttpFetcher, SmhiClient};

/// Render static weather, warning and groundwater dashboards from SMHI open data
#[derive(FromArgs, Debug)]
struct Args {
    /// path to a TOML config file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// log at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Option<Command>,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Table(TableCommand),
    Charts(ChartsCommand),
}

/// weather and warning tables (default)
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "table")]
struct TableCommand {
    /// coordinates file, overrides paths.coordinates_file
    #[argh(option)]
    coordinates: Option<PathBuf>,

    /// output file, overrides paths.table_output
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

/// temperature, rainfall and groundwater charts
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "charts")]
struct ChartsCommand {
    /// coordinates file, overrides paths.coordinates_file
    #[argh(option)]
    coordinates: Option<PathBuf>,

    /// output file, overrides paths.charts_output
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

fn main() {
    let args: Args = argh::from_env();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        let message = match e.downcast_ref::<vgdash::DashboardError>() {
            Some(err) => err.user_message(),
            None => format!("{e:#}"),
        };
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = DashboardConfig::load_from_path(args.config)?;
    vgdash::logging::init(&config.logging, args.verbose);
    debug!("Configuration: {:?}", config);

    let (kind, coordinates, output) = match args.command {
        Some(Command::Charts(cmd)) => (
            DashboardKind::Charts,
            cmd.coordinates,
            cmd.output.unwrap_or_else(|| config.paths.charts_output.clone()),
        ),
        Some(Command::Table(cmd)) => (
            DashboardKind::Table,
            cmd.coordinates,
            cmd.output.unwrap_or_else(|| config.paths.table_output.clone()),
        ),
        None => (DashboardKind::Table, None, config.paths.table_output.clone()),
    };
    let coordinates = coordinates.unwrap_or_else(|| config.paths.coordinates_file.clone());

    info!("Generating {:?} dashboard", kind);
    let locations = load_locations(&coordinates)?;

    let fetcher = HttpFetcher::new(&config.sources)?;
    let client = SmhiClient::new(fetcher, Endpoints::from(&config.sources));
    let dashboard = Dashboard::new(client, config.charts.clone());

    dashboard
        .generate(kind, &locations, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Dashboard written to {}", output.display());
    Ok(())
}

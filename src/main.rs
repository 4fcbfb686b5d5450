use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process::exit;

use clap::Parser;
use itertools::Itertools;
use log::{debug, error, info};

use command::CommandReader;
use fleet::FleetCapacity;
use highway::Highway;
use reply::Vocabulary;
use session::Session;

mod col;
mod command;
mod fleet;
mod frontier;
mod highway;
mod index;
mod planner;
mod primitives;
mod reply;
mod session;
mod station;
#[cfg(test)]
mod test;

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Maintains stations and vehicle fleets along a highway and plans routes between them"
)]
struct Cli {
    #[arg(
        short = 'i',
        long,
        help = "The file to read commands from. Commands are read from stdin if not given."
    )]
    input: Option<String>,

    #[arg(
        long,
        default_value_t = FleetCapacity::default(),
        help = "The maximum number of vehicles per station, or `unbounded`."
    )]
    fleet_capacity: FleetCapacity,

    #[arg(
        long,
        value_enum,
        default_value_t = Vocabulary::English,
        help = "The language of the replies."
    )]
    vocabulary: Vocabulary,
}

fn open_input(path: Option<&str>) -> io::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}

fn main() {
    env_logger::builder().parse_env("LOG").init();
    let cli = Cli::parse();

    let input = open_input(cli.input.as_deref()).unwrap_or_else(|it| {
        error!("Could not open input {:?}: {}", cli.input, it);
        exit(1);
    });
    info!(
        "Fleet capacity: {}, vocabulary: {:?}",
        cli.fleet_capacity, cli.vocabulary
    );

    let stdout = io::stdout().lock();
    let mut session = Session::new(
        Highway::new(cli.fleet_capacity),
        cli.vocabulary,
        BufWriter::new(stdout),
    );
    let summary = session
        .run(CommandReader::new(input))
        .unwrap_or_else(|it| {
            error!("Session failed:\n{:#?}", it);
            exit(1);
        });

    let stations = session.highway().stations();
    info!(
        "Executed {} commands{}, skipped {} words; {} stations left (tree height {})",
        summary.executed,
        if summary.aborted { " before malformed input" } else { "" },
        summary.skipped,
        stations.len(),
        stations.height()
    );
    debug!(
        "Stations left: {}",
        stations.iter().map(|it| it.distance).join(" ")
    );
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod dal;
mod model;
mod scraping;
mod timetable;
mod utils;

use dal::{load_timetables, save_graph, save_timetables};
use model::schedule::LineTimetables;
use scraping::mpk_client::{MpkClient, ScraperConfig};
use timetable::assembler::assemble_route;
use timetable::graph::build_connection_graph;

#[derive(Parser)]
#[command(about = "Scrapes MPK Kraków timetables and builds the bus connection graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download every line's timetables, then write both output files
    Scrape {
        #[arg(long, default_value = "lines_stops_times_dict")]
        timetables: PathBuf,

        #[arg(long, default_value = "graph")]
        graph: PathBuf,
    },
    /// Rebuild the connection graph from an existing timetables file
    Graph {
        #[arg(long, default_value = "lines_stops_times_dict")]
        timetables: PathBuf,

        #[arg(long, default_value = "graph")]
        graph: PathBuf,
    },
}

fn main() -> Result<()> {
    _ = dotenv();
    let _guard = init_tracing();

    match Cli::parse().command {
        Command::Scrape { timetables, graph } => scrape(&timetables, &graph),
        Command::Graph { timetables, graph } => regenerate_graph(&timetables, &graph),
    }
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily("./logs", "mpk_timetables.log");
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    Registry::default()
        .with(file_log)
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    guard
}

fn scrape(timetables_path: &Path, graph_path: &Path) -> Result<()> {
    let config = ScraperConfig::from_env();
    let client = MpkClient::new(&config)?;

    let directory = client.line_directory()?;
    let source = client.schedule_source(&directory.date);

    let mut timetables = LineTimetables::new();

    for (i, line) in directory.lines.iter().enumerate() {
        if let Err(e) = scrape_line(&client, &source, &directory.date, line, &mut timetables) {
            error!("skipping line {line}: {e:#}");
        }

        info!("scraped line {}/{}", i + 1, directory.lines.len());
    }

    save_timetables(timetables_path, &timetables)?;
    info!(
        "wrote {} routes to {}",
        timetables.len(),
        timetables_path.display()
    );

    write_graph(&timetables, graph_path)
}

fn scrape_line(
    client: &MpkClient,
    source: &scraping::mpk_client::MpkScheduleSource<'_>,
    date: &str,
    line: &str,
    timetables: &mut LineTimetables,
) -> Result<()> {
    let variants = client.route_variant_count(date, line)?;

    for variant in 1..=variants {
        let first = client.first_stop(date, line, variant)?;
        let stops = assemble_route(source, first)?;

        info!("line {line} variant {variant}: {} stops", stops.len());
        timetables.insert(format!("{line}_{variant}"), stops);
    }

    Ok(())
}

fn regenerate_graph(timetables_path: &Path, graph_path: &Path) -> Result<()> {
    let timetables = load_timetables(timetables_path)?;

    write_graph(&timetables, graph_path)
}

fn write_graph(timetables: &LineTimetables, graph_path: &Path) -> Result<()> {
    let graph = build_connection_graph(timetables);

    save_graph(graph_path, &graph)?;
    info!(
        "wrote a graph of {} stops to {}",
        graph.len(),
        graph_path.display()
    );

    Ok(())
}

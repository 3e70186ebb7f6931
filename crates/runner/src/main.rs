use chronospan_clock::{Clock, SystemClock};
use chronospan_runner::{Command, HELP, Harness, Outcome, RunnerConfig};
use chronospan_tracer::LogExporter;
use env_logger::Env;
use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

fn print_help() {
    eprintln!(
        r#"Chronospan - span timing under injected clock drift

USAGE:
    chronospan [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    CHRONOSPAN_DRIFT_MS             Initial drift in ms (default: 0)
    CHRONOSPAN_READOUT_INTERVAL_MS  Readout period in ms (default: 1000)
    OTEL_SPAN_EVENT_COUNT_LIMIT     Max events per span (default: unlimited)
    OTEL_SPAN_ATTRIBUTE_COUNT_LIMIT Max attributes per span (default: unlimited)
    RUST_LOG                        Log level filter

{HELP}"#
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => RunnerConfig::from_env()?,
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let mut harness = Harness::new(clock, Arc::new(LogExporter::new()), &config);

    let readout_task = harness.drift().spawn_readout();
    let mut readouts = harness.drift().subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match readouts.recv().await {
                Ok(readout) => info!(
                    "Date.now {} | origin + monotonic {}",
                    readout.wall_iso, readout.monotonic_iso
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let outcome = match line.parse::<Command>() {
            Ok(command) => harness.handle(command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue) => {}
            Err(e) => warn!("{e}"),
        }
    }

    readout_task.abort();
    printer.abort();
    info!("Shutting down");
    Ok(())
}

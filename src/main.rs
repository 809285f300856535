use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plantalytics::config::TemplateOptions;
use plantalytics::templates::update_globe_rotation;
use plantalytics::{
    filter_plant_data, populate_options, process_plant_data, process_plant_json, ChartBundle,
    FilterSelection,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "plantalytics")]
#[command(about = "Shape plant CSV data into chart datasets for the dashboard", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the chart bundle from plant CSV
    Process {
        /// CSV file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Input is a JSON array of plant objects instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Narrow a bundle by region and/or hardiness zone
    Filter {
        /// Bundle JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        region: Option<String>,
        #[arg(short, long)]
        zone: Option<u8>,
    },
    /// Emit the populated chart options for a bundle
    Options {
        /// Bundle JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Template options JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Disable globe auto-rotation
        #[arg(long)]
        docked: bool,
    },
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn read_bundle(path: Option<&Path>) -> Result<ChartBundle> {
    let text = read_input(path)?;
    serde_json::from_str(&text).context("Failed to parse bundle JSON")
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).context("Failed to write JSON to stdout")?;
    writeln!(handle).context("Failed to write JSON to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Process { input, json } => {
            let text = read_input(input.as_deref())?;
            let bundle = if json {
                process_plant_json(&text)
            } else {
                process_plant_data(&text)
            }
            .context("Failed to process plant data")?;
            write_json(&bundle)
        }
        Command::Filter { input, region, zone } => {
            let bundle = read_bundle(input.as_deref())?;
            let filtered = filter_plant_data(&bundle, &FilterSelection::new(region, zone));
            write_json(&filtered)
        }
        Command::Options { input, config, docked } => {
            let bundle = read_bundle(input.as_deref())?;
            let opts = match config {
                Some(path) => TemplateOptions::load(&path)?,
                None => TemplateOptions::default(),
            };
            let mut options = populate_options(&bundle, &opts);
            if docked {
                update_globe_rotation(Some(&mut options.globe), true);
            }
            write_json(&options)
        }
    }
}

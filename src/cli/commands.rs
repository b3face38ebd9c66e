use std::fs;
use tracing::info;

use crate::cli::args::{Cli, Commands};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::processors::Dashboard;
use crate::readers::StationReader;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = AnalysisConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            station,
            date,
            data_dir,
            stations_file,
            json,
            output_file,
        } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            if stations_file.is_some() {
                config.stations_file = stations_file;
            }
            info!(data_dir = %config.data_dir.display(), "analyzing {}", station);

            let loader = config.loader();
            let mut dashboard = Dashboard::new(config).with_selected_date(date);
            let message = format!("Analyzing {}...", station);
            let progress = ProgressReporter::new_spinner(&message, json);

            let outcome = dashboard.select_station(&loader, &station);
            progress.finish_with_status(dashboard.status(), &station.to_uppercase());
            let report = outcome?.report;

            if let Some(path) = output_file {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, serde_json::to_string_pretty(&report)?)?;
                progress.println(&format!("Report written to {}", path.display()));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("\n{}", report.summary());
            }
        }

        Commands::Stations { stations_file } => {
            let path = stations_file.unwrap_or_else(|| config.stations_path());
            let stations = StationReader::new().read_stations(&path)?;

            println!("{} stations in {}", stations.len(), path.display());
            for station in &stations {
                let since = station
                    .archive_begin
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!(
                    "{:<6} {:<40} {:<12} since {}",
                    station.stid, station.name, station.network, since
                );
            }
        }
    }

    Ok(())
}

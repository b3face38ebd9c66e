use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-flash")]
#[command(about = "Daily weather records and highlights for a single station")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank and classify one day against the station's history
    Analyze {
        #[arg(short, long, help = "Station identifier, e.g. CMI")]
        station: String,

        #[arg(short, long, help = "Date to analyze (YYYY-MM-DD) [default: latest day]")]
        date: Option<NaiveDate>,

        #[arg(long, help = "Directory holding {STATION}.csv daily summaries")]
        data_dir: Option<PathBuf>,

        #[arg(long, help = "Station metadata CSV [default: {data_dir}/stations.csv]")]
        stations_file: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Print the report as JSON")]
        json: bool,

        #[arg(short, long, help = "Write the JSON report to this file")]
        output_file: Option<PathBuf>,
    },

    /// List stations in a metadata file
    Stations {
        #[arg(long, help = "Station metadata CSV [default: {data_dir}/stations.csv]")]
        stations_file: Option<PathBuf>,
    },
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traffic-weather-joiner")]
#[command(about = "Join traffic measurements with nearby weather and add calendar features")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

/// Join settings that override the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct JoinOverrides {
    #[arg(long, help = "Largest tolerated traffic/weather time gap in minutes")]
    pub tolerance_minutes: Option<i64>,

    #[arg(long, help = "Individual staleness warnings per segment before summarising")]
    pub max_skip_warnings: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the traffic table into one file per segment
    Split {
        #[arg(short, long, help = "Traffic CSV with coordinates")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Directory for per-segment files")]
        output_dir: Option<PathBuf>,
    },

    /// Sort every per-segment file by time
    Sort {
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Attach the closest-in-time weather record to each traffic row
    MergeWeather {
        #[arg(short, long, help = "Weather CSV keyed by location_id and time")]
        weather: Option<PathBuf>,

        #[arg(short, long, help = "Directory of time-sorted per-segment files")]
        input_dir: Option<PathBuf>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        join: JoinOverrides,
    },

    /// Concatenate every per-segment file into one table
    Concat {
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },

    /// Append holiday, weekend and cyclical time features
    Features {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },

    /// Run every stage in order
    Run {
        #[arg(long, default_value = "false")]
        skip_split: bool,

        #[arg(long, default_value = "false")]
        skip_sort: bool,

        #[arg(long, default_value = "false")]
        skip_merge_weather: bool,

        #[arg(long, default_value = "false")]
        skip_concat: bool,

        #[arg(long, default_value = "false")]
        skip_features: bool,

        #[command(flatten)]
        join: JoinOverrides,
    },
}

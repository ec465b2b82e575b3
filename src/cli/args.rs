use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vpts-processor")]
#[command(about = "Enumerate and parse daily weather-radar vertical profile (VPTS) files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Settings file (TOML) [default: vpts.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the daily file references covering a date range
    Files {
        #[arg(short, long, help = "First day (YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD)")]
        start: String,

        #[arg(short, long, help = "Last day, inclusive")]
        end: String,

        #[arg(short, long, help = "Directory prefix, prepended verbatim")]
        directory: Option<String>,
    },

    /// Read and parse the daily files covering a date range
    Read {
        #[arg(short, long, help = "First day (YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD)")]
        start: String,

        #[arg(short, long, help = "Last day, inclusive")]
        end: String,

        #[arg(short, long, help = "Directory prefix, prepended verbatim")]
        directory: Option<String>,

        #[arg(long, help = "Non-data lines before the CSV header")]
        header_lines: Option<usize>,

        #[arg(long, help = "Fail on rows with missing columns")]
        strict: bool,

        #[arg(long, help = "Print rows as JSON instead of a summary")]
        json: bool,

        #[arg(
            long,
            default_value = "0",
            help = "Maximum rows to print with --json (0 = all rows)"
        )]
        limit: usize,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// List the known radar sites
    Radars {
        #[arg(short, long, help = "Show a single radar by ODIM code")]
        code: Option<String>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
}

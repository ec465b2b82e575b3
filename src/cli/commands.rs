use tracing::{debug, info};
use validator::Validate;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{available_radars, find_radar, FileReference, ProfileSummary};
use crate::readers::ProfileReader;
use crate::settings::Settings;
use crate::utils::filename::DateRangeExpander;
use crate::utils::progress::ProgressReporter;

/// Set up stderr logging; `RUST_LOG` takes precedence over `--verbose`
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vpts_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

fn expand_references(
    settings: &Settings,
    start: &str,
    end: &str,
    directory: Option<String>,
) -> Result<Vec<FileReference>> {
    let directory = directory.unwrap_or_else(|| settings.data_directory.clone());
    let expander = DateRangeExpander::from_settings(settings).with_logging();
    expander.expand(start, end, &directory)
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("Settings: {:?}", settings);

    match cli.command {
        Commands::Files {
            start,
            end,
            directory,
        } => {
            for reference in expand_references(&settings, &start, &end, directory)? {
                println!("{}", reference);
            }
        }

        Commands::Read {
            start,
            end,
            directory,
            header_lines,
            strict,
            json,
            limit,
            quiet,
        } => {
            let references = expand_references(&settings, &start, &end, directory)?;
            info!(
                "Reading {} daily files from {} to {}",
                references.len(),
                start,
                end
            );

            let reader = ProfileReader::from_settings(&settings)
                .with_header_lines(header_lines.unwrap_or(settings.header_lines))
                .with_strict(strict);
            let progress = ProgressReporter::new(references.len() as u64, quiet || json);

            let batch = reader.read_references(&references, &progress)?;

            if json {
                let rows = if limit > 0 && limit < batch.rows.len() {
                    &batch.rows[..limit]
                } else {
                    &batch.rows[..]
                };
                println!("{}", serde_json::to_string_pretty(rows)?);
                return Ok(());
            }

            let summary = ProfileSummary::from_rows(&batch.rows);
            println!("\n{}", summary.summary());
            println!(
                "Files read: {}, missing: {}",
                batch.files_read,
                batch.missing_files.len()
            );
            for missing in &batch.missing_files {
                println!("  missing: {}", missing);
            }
        }

        Commands::Radars { code, json } => {
            let radars = match code {
                Some(code) => vec![find_radar(&code)?],
                None => available_radars(),
            };
            for radar in &radars {
                radar.validate()?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&radars)?);
                return Ok(());
            }

            println!("Data host: {}", settings.data_base_url);
            for radar in &radars {
                let marker = if radar.odim_code == settings.initial_radar {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {:<6} {:<14} {:<16} {:>9.5} {:>9.5}  {}",
                    marker,
                    radar.odim_code,
                    radar.location,
                    radar.country,
                    radar.latitude,
                    radar.longitude,
                    radar.timezone
                );
            }
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use emission_forecast::{
    DataLoader, ForecastConfig, ForecastError, ForecastReport, ForecastRequest, Forecaster,
    ReferenceDataset, SeriesSource,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset; covers the library and this binary
const DEFAULT_LOG_FILTER: &str = "emission_forecast=info,co2_forecast=info";

/// Ensemble CO2 emission forecasts from yearly history
#[derive(Debug, Parser)]
#[command(name = "co2-forecast", version, about)]
struct Cli {
    /// CSV file with an `entity,year,value` header (defaults to the built-in data)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forecast one entity, or the global series when no entity is given
    Predict {
        /// Target year of the point forecast
        #[arg(long)]
        year: i32,

        /// Entity to forecast
        #[arg(long)]
        entity: Option<String>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the JSON report instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// List entities known to the dataset
    Entities,
}

fn load_dataset(path: Option<&PathBuf>) -> Result<ReferenceDataset, ForecastError> {
    match path {
        Some(path) => DataLoader::from_csv(path),
        None => DataLoader::builtin(),
    }
}

fn run(cli: Cli) -> Result<(), ForecastError> {
    let dataset = load_dataset(cli.data.as_ref())?;

    match cli.command {
        Command::Entities => {
            for entity in dataset.entities() {
                println!("{}", entity);
            }
        }
        Command::Predict {
            year,
            entity,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => ForecastConfig::from_toml_file(path)?,
                None => ForecastConfig::default(),
            };

            let forecaster = Forecaster::new(dataset, config)?;
            let request = ForecastRequest {
                entity_id: entity,
                target_year: year,
            };
            let result = forecaster.forecast(&request)?;

            if json {
                println!("{}", ForecastReport::from(&result).to_json()?);
            } else {
                println!("{}", result.narrative.summary);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "forecast failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary_target() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER
            .split(',')
            .any(|directive| directive == format!("{}=info", env!("CARGO_CRATE_NAME"))));
    }

    #[test]
    fn test_predict_arguments_parse() {
        let cli = Cli::try_parse_from(["co2-forecast", "predict", "--year", "2050", "--entity", "India"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Predict { year: 2050, entity: Some(ref e), json: false, .. } if e == "India"
        ));
    }
}

//! CLI options.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand as ClapSubcommand};

use crate::features::{Location, PropertyType, UserInput};
use crate::importance::DEFAULT_TOP;
use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
pub struct Opts {
    #[command(flatten)]
    pub sentry: SentryOpts,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Args)]
pub struct SentryOpts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,
}

#[derive(ClapSubcommand)]
pub enum Subcommand {
    Web(WebOpts),
    Predict(PredictOpts),
    Importance(ImportanceOpts),
}

#[derive(Args)]
pub struct ModelOpts {
    /// Model bundle: pickled or JSON dictionary with `model` and `columns`
    #[arg(short = 'm', long = "model", default_value = "xgb_log_model.pkl", env = "HOME_PRICE_MODEL")]
    pub path: PathBuf,
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub model: ModelOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "HOME_PRICE_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8501", env = "HOME_PRICE_PORT")]
    pub port: u16,
}

/// Estimates the price of a single property
#[derive(Args)]
pub struct PredictOpts {
    #[command(flatten)]
    pub model: ModelOpts,

    /// Living area, m²
    #[arg(long, value_parser = parse_area)]
    pub living_area: f64,

    /// Land area, m²
    #[arg(long, default_value = "0", value_parser = parse_area)]
    pub land_area: f64,

    /// Number of rooms
    #[arg(
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(UserInput::MIN_ROOMS as i64..=UserInput::MAX_ROOMS as i64),
    )]
    pub rooms: u32,

    #[arg(long, value_enum, default_value_t = PropertyType::House)]
    pub property_type: PropertyType,

    #[arg(long, default_value_t = Location::DEFAULT.latitude, allow_negative_numbers = true)]
    pub latitude: f64,

    #[arg(long, default_value_t = Location::DEFAULT.longitude, allow_negative_numbers = true)]
    pub longitude: f64,
}

impl PredictOpts {
    #[must_use]
    pub const fn user_input(&self) -> UserInput {
        UserInput {
            living_area_m2: self.living_area,
            land_area_m2: self.land_area,
            rooms: self.rooms,
            property_type: self.property_type,
            location: Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
        }
    }
}

/// Prints the most important model features
#[derive(Args)]
pub struct ImportanceOpts {
    #[command(flatten)]
    pub model: ModelOpts,

    /// Number of features to show
    #[arg(long, default_value_t = DEFAULT_TOP, value_parser = parse_top)]
    pub top: usize,
}

fn parse_area(value: &str) -> Result<f64> {
    let value = f64::from_str(value)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(anyhow!("{} is not a valid area", value))
    }
}

fn parse_top(value: &str) -> Result<usize> {
    let value = usize::from_str(value)?;
    if value != 0 {
        Ok(value)
    } else {
        Err(anyhow!("expected a non-zero number of features"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parse_predict_ok() -> Result {
        let opts = Opts::try_parse_from([
            "home-price",
            "predict",
            "--living-area",
            "100",
            "--land-area",
            "500",
            "--rooms",
            "4",
            "--property-type",
            "apartment",
        ])?;
        match opts.subcommand {
            Subcommand::Predict(opts) => {
                let input = opts.user_input();
                assert_eq!(input.rooms, 4);
                assert_eq!(input.property_type, PropertyType::Apartment);
                assert_eq!(input.location, Location::DEFAULT);
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    #[test]
    fn parse_negative_area_error() {
        assert!(Opts::try_parse_from(["home-price", "predict", "--living-area=-1"]).is_err());
    }

    #[test]
    fn parse_too_many_rooms_error() {
        assert!(
            Opts::try_parse_from(["home-price", "predict", "--living-area=50", "--rooms=21"])
                .is_err()
        );
    }
}

mod display;
mod forecast;
mod interactive;
mod series;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{forecast::forecast, interactive::interactive, series::series};
use crate::{
    api::forecast::Api,
    cli::{display::DisplayArgs, forecast::ForecastArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub service: ServiceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a forecast request, then show the billing summary and the kVAh comparison.
    #[clap(name = "forecast")]
    Forecast(Box<ForecastArgs>),

    /// Show the currently stored kVAh comparison without submitting anything.
    #[clap(name = "series")]
    Series(DisplayArgs),

    /// Read `START END [HOURS]` requests from the standard input, one per line.
    #[clap(name = "interactive")]
    Interactive(DisplayArgs),
}

#[derive(Parser)]
pub struct ServiceArgs {
    /// Forecasting backend base URL.
    #[clap(
        long = "base-url",
        env = "FORECAST_API_BASE_URL",
        default_value = "http://localhost:5000"
    )]
    pub base_url: Url,

    /// Request timeout, forecasting may take a while.
    #[clap(long = "timeout", env = "FORECAST_API_TIMEOUT", default_value = "60s")]
    pub timeout: humantime::Duration,
}

impl ServiceArgs {
    pub fn new_api(&self) -> Result<Api> {
        Api::new(&self.base_url, *self.timeout)
            .with_context(|| format!("failed to set up the client for `{}`", self.base_url))
    }
}

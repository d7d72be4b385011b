use chrono::NaiveDate;
use clap::Parser;

use crate::{
    api::{forecast::Api, service::ForecastRequest},
    cli::display::DisplayArgs,
    core::dashboard::Dashboard,
    prelude::*,
};

#[derive(Parser)]
pub struct ForecastArgs {
    /// First day of the historical data to forecast from, for example: `2024-01-01`.
    #[clap(long)]
    pub start_date: NaiveDate,

    /// Last day of the historical data to forecast from.
    #[clap(long)]
    pub end_date: NaiveDate,

    /// Forecast horizon.
    #[clap(long, default_value = "24", value_parser = clap::value_parser!(u32).range(1..))]
    pub forecast_hours: u32,

    #[clap(flatten)]
    pub display: DisplayArgs,
}

impl ForecastArgs {
    pub fn request(&self) -> ForecastRequest {
        ForecastRequest::builder()
            .start_date(self.start_date)
            .end_date(self.end_date)
            .forecast_hours(self.forecast_hours)
            .build()
    }
}

#[instrument(skip_all)]
pub async fn forecast(api: &Api, args: &ForecastArgs) -> Result {
    let mut dashboard = Dashboard::default();
    match dashboard.refresh(api, args.request()).await {
        Ok(snapshot) => {
            args.display.print_snapshot(snapshot);
            Ok(())
        }
        Err(error) => {
            args.display.print_placeholder();
            Err(error).context("the forecast is unavailable")
        }
    }
}

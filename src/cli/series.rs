use crate::{
    api::service::ForecastService,
    cli::display::DisplayArgs,
    core::{
        error::ForecastError,
        reconcile::{ReconciledSeries, merge},
    },
    prelude::*,
};

/// Show the stored series, or the placeholder when it cannot be fetched or merged.
#[instrument(skip_all)]
pub async fn series<S: ForecastService + ?Sized>(service: &S, display: DisplayArgs) -> Result {
    match fetch_series(service).await {
        Ok(series) => {
            display.print_series(&series);
            Ok(())
        }
        Err(error) => {
            display.print_placeholder();
            Err(error).context("the kVAh comparison is unavailable")
        }
    }
}

async fn fetch_series<S: ForecastService + ?Sized>(
    service: &S,
) -> Result<ReconciledSeries, ForecastError> {
    let data = service.get_forecast_data().await?;
    Ok(merge(&data.actual, &data.forecast)?)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::{StatusCode, Url};

    use super::*;
    use crate::{
        api::service::{ForecastData, ForecastRequest},
        core::{billing::BillingSummary, reading::Reading},
        quantity::energy::KilovoltAmpereHours,
    };

    /// Serves the canned data, or answers 404 when there is none.
    struct Stored(Option<ForecastData>);

    #[async_trait]
    impl ForecastService for Stored {
        async fn submit(&self, _: &ForecastRequest) -> Result<BillingSummary, ForecastError> {
            Ok(BillingSummary::default())
        }

        async fn get_forecast_data(&self) -> Result<ForecastData, ForecastError> {
            self.0.clone().ok_or_else(|| ForecastError::Response {
                url: Url::parse("http://localhost:5000/api/forecast-data").unwrap(),
                status: StatusCode::NOT_FOUND,
                message: Some("No forecast data available".to_owned()),
            })
        }
    }

    #[tokio::test]
    async fn test_series_ok() -> Result {
        let data = ForecastData {
            actual: vec![Reading::new("2024-01-01 00:00:00", KilovoltAmpereHours(1.0))],
            forecast: vec![Reading::new("2024-01-01 01:00:00", KilovoltAmpereHours(2.0))],
        };
        series(&Stored(Some(data)), DisplayArgs { coalesce: false }).await
    }

    #[tokio::test]
    async fn test_series_unavailable() {
        let error = series(&Stored(None), DisplayArgs { coalesce: true }).await.unwrap_err();
        assert_eq!(error.to_string(), "the kVAh comparison is unavailable");
        assert!(matches!(
            error.downcast_ref::<ForecastError>(),
            Some(ForecastError::Response { status, .. }) if *status == StatusCode::NOT_FOUND,
        ));
    }

    #[tokio::test]
    async fn test_series_malformed_timestamp() {
        let data = ForecastData {
            actual: vec![Reading::new("not-a-date", KilovoltAmpereHours(1.0))],
            forecast: Vec::new(),
        };
        let error = series(&Stored(Some(data)), DisplayArgs { coalesce: false }).await.unwrap_err();
        assert!(matches!(error.downcast_ref::<ForecastError>(), Some(ForecastError::Format(_))));
    }
}

use async_trait::async_trait;
use bon::Builder;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{billing::BillingSummary, error::ForecastError, reading::Reading};

/// Forecast request as submitted by the user.
///
/// Dates are sent as-is: the service is the authority on their validity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Builder)]
#[must_use]
pub struct ForecastRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[builder(default = 24)]
    pub forecast_hours: u32,
}

/// Latest stored readings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForecastData {
    pub actual: Vec<Reading>,
    pub forecast: Vec<Reading>,
}

/// Remote side of the dashboard.
#[async_trait]
pub trait ForecastService: Sync {
    /// Submit the request and return its billing summary.
    ///
    /// The billing summary is the only authoritative output of the submission.
    async fn submit(&self, request: &ForecastRequest) -> Result<BillingSummary, ForecastError>;

    /// Read whatever actual and forecasted series the service currently stores.
    ///
    /// The data is independent of any particular submission.
    async fn get_forecast_data(&self) -> Result<ForecastData, ForecastError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_request() -> anyhow::Result<()> {
        let request = ForecastRequest::builder()
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
            .build();
        assert_eq!(
            serde_json::to_string(&request)?,
            r#"{"start_date":"2024-01-01","end_date":"2024-01-07","forecast_hours":24}"#,
        );
        Ok(())
    }
}

//! Client of the forecasting backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    api::service::{ForecastData, ForecastRequest, ForecastService},
    core::{
        billing::BillingSummary,
        error::{ForecastError, FormatError},
        reading::Reading,
    },
    prelude::*,
    quantity::energy::KilovoltAmpereHours,
};

pub struct Api {
    client: reqwest::Client,
    submit_url: Url,
    data_url: Url,
}

impl Api {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        // Otherwise, `join` would replace the last path segment.
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            submit_url: base_url.join("forecast")?,
            data_url: base_url.join("api/forecast-data")?,
        })
    }

    async fn send<T: DeserializeOwned>(
        url: &Url,
        request: RequestBuilder,
    ) -> Result<T, ForecastError> {
        let network_error = |source| ForecastError::Network { url: url.clone(), source };
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        debug!(%status, len = body.len(), "received");
        into_result(url, status, &body)
    }
}

/// Decode the body of a successful response, or turn a failed one into [`ForecastError::Response`].
fn into_result<T: DeserializeOwned>(
    url: &Url,
    status: StatusCode,
    body: &[u8],
) -> Result<T, ForecastError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error.or(body.message));
        return Err(ForecastError::Response { url: url.clone(), status, message });
    }
    Ok(serde_json::from_slice(body).map_err(FormatError::Body)?)
}

#[async_trait]
impl ForecastService for Api {
    #[instrument(
        skip_all,
        fields(
            start_date = %request.start_date,
            end_date = %request.end_date,
            forecast_hours = request.forecast_hours,
        ),
    )]
    async fn submit(&self, request: &ForecastRequest) -> Result<BillingSummary, ForecastError> {
        info!("submitting…");
        let response: SubmitResponse =
            Self::send(&self.submit_url, self.client.post(self.submit_url.clone()).json(request))
                .await?;
        if response.billing_info.is_empty() {
            warn!("the billing summary is empty");
        }
        info!(n_entries = response.billing_info.len(), "submitted");
        Ok(response.billing_info)
    }

    #[instrument(skip_all)]
    async fn get_forecast_data(&self) -> Result<ForecastData, ForecastError> {
        info!("fetching…");
        let data: ForecastData =
            Self::send::<DataResponse>(&self.data_url, self.client.get(self.data_url.clone()))
                .await?
                .into();
        info!(n_actual = data.actual.len(), n_forecast = data.forecast.len(), "fetched");
        Ok(data)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    billing_info: BillingSummary,
}

#[derive(Deserialize)]
struct DataResponse {
    #[serde(rename = "actual_hourly_kVAh")]
    actual: Vec<ActualReading>,

    #[serde(rename = "forecasted_kVAh")]
    forecast: Vec<ForecastedReading>,
}

impl From<DataResponse> for ForecastData {
    fn from(response: DataResponse) -> Self {
        Self {
            actual: response
                .actual
                .into_iter()
                .map(|reading| Reading::new(reading.timestamp, reading.value))
                .collect(),
            forecast: response
                .forecast
                .into_iter()
                .map(|reading| Reading::new(reading.timestamp, reading.value))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct ActualReading {
    #[serde(rename = "DateTime")]
    timestamp: String,

    /// Hourly consumption difference.
    #[serde(rename = "kVah_diff", default)]
    value: Option<KilovoltAmpereHours>,
}

#[derive(Deserialize)]
struct ForecastedReading {
    #[serde(rename = "DateTime")]
    timestamp: String,

    #[serde(rename = "Forecasted_kVah", default)]
    value: Option<KilovoltAmpereHours>,
}

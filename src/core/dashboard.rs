use chrono::{DateTime, Local};

use crate::{
    api::service::{ForecastRequest, ForecastService},
    core::{
        billing::FormattedBilling,
        error::ForecastError,
        reconcile::{ReconciledSeries, merge},
    },
    prelude::*,
};

/// Everything displayed after one successful refresh.
#[derive(Clone, Debug)]
#[must_use]
pub struct Snapshot {
    pub request: ForecastRequest,
    pub billing: FormattedBilling,
    pub series: ReconciledSeries,
    pub refreshed_at: DateTime<Local>,
}

/// Dashboard state: the latest snapshot, if any.
///
/// The snapshot is only ever replaced as a whole, so a failed refresh leaves
/// the previous one on display.
#[derive(Default)]
pub struct Dashboard {
    snapshot: Option<Snapshot>,
}

impl Dashboard {
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Submit the request, then read back the stored series and replace the snapshot.
    ///
    /// The series are read only after the submission succeeded. They reflect whatever
    /// the service stores at that moment, which is not necessarily this request's outcome.
    #[instrument(skip_all, fields(start_date = %request.start_date, end_date = %request.end_date))]
    pub async fn refresh<S: ForecastService + ?Sized>(
        &mut self,
        service: &S,
        request: ForecastRequest,
    ) -> Result<&Snapshot, ForecastError> {
        let billing = service.submit(&request).await?.format()?;
        let data = service.get_forecast_data().await?;
        let series = merge(&data.actual, &data.forecast)?;
        info!(n_points = series.len(), total = %billing.total, "refreshed");
        Ok(self.snapshot.insert(Snapshot { request, billing, series, refreshed_at: Local::now() }))
    }
}

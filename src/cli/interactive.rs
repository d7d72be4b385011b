use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use crate::{
    api::{forecast::Api, service::ForecastRequest},
    cli::display::DisplayArgs,
    core::dashboard::Dashboard,
    prelude::*,
};

/// Refresh the dashboard on every submitted line until the input ends.
///
/// Failures are logged, and the previous snapshot stays on display.
#[instrument(skip_all)]
pub async fn interactive(api: &Api, display: DisplayArgs) -> Result {
    let mut dashboard = Dashboard::default();
    let mut lines = BufReader::new(stdin()).lines();
    display.print_placeholder();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let request = match parse_request(&line) {
            Ok(request) => request,
            Err(error) => {
                warn!("invalid request: {error:#}");
                continue;
            }
        };
        if let Err(error) = dashboard.refresh(api, request).await {
            error!("failed to refresh: {:#}", Error::from(error));
        }
        match dashboard.snapshot() {
            Some(snapshot) => display.print_snapshot(snapshot),
            None => display.print_placeholder(),
        }
    }

    Ok(())
}

/// Parse `START END [HOURS]`.
fn parse_request(line: &str) -> Result<ForecastRequest> {
    let mut parts = line.split_whitespace();
    let start_date: NaiveDate =
        parts.next().context("missing the start date")?.parse().context("invalid start date")?;
    let end_date: NaiveDate =
        parts.next().context("missing the end date")?.parse().context("invalid end date")?;
    let forecast_hours = match parts.next() {
        Some(hours) => hours.parse().context("invalid forecast hours")?,
        None => 24,
    };
    ensure!(forecast_hours >= 1, "forecast hours must be positive");
    ensure!(parts.next().is_none(), "unexpected trailing input");
    Ok(ForecastRequest::builder()
        .start_date(start_date)
        .end_date(end_date)
        .forecast_hours(forecast_hours)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_ok() -> Result {
        let request = parse_request("2024-01-01 2024-01-07 48")?;
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(request.forecast_hours, 48);
        Ok(())
    }

    #[test]
    fn test_parse_request_default_hours() -> Result {
        assert_eq!(parse_request("  2024-01-01   2024-01-02 ")?.forecast_hours, 24);
        Ok(())
    }

    #[test]
    fn test_parse_request_does_not_check_the_range() -> Result {
        let request = parse_request("2024-01-07 2024-01-01")?;
        assert!(request.start_date > request.end_date);
        Ok(())
    }

    #[test]
    fn test_parse_request_errors() {
        for line in [
            "2024-01-01",
            "2024-01-01 tomorrow",
            "2024-01-01 2024-01-02 0",
            "2024-01-01 2024-01-02 -5",
            "2024-01-01 2024-01-02 24 extra",
        ] {
            assert!(parse_request(line).is_err(), "`{line}` must be rejected");
        }
    }
}

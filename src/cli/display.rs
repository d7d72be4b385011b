use clap::Parser;

use crate::{
    core::{dashboard::Snapshot, reconcile::ReconciledSeries},
    tables::{
        PLACEHOLDER,
        build_billing_table,
        build_coalesced_table,
        build_series_table,
        build_summary_table,
        format_total_line,
    },
};

#[derive(Copy, Clone, Parser)]
pub struct DisplayArgs {
    /// Fold the actual and forecasted values sharing a timestamp into a single row.
    #[clap(long)]
    pub coalesce: bool,
}

impl DisplayArgs {
    pub fn print_snapshot(self, snapshot: &Snapshot) {
        println!(
            "Forecast of {} hours from {} to {}, refreshed at {}",
            snapshot.request.forecast_hours,
            snapshot.request.start_date,
            snapshot.request.end_date,
            snapshot.refreshed_at.format("%H:%M:%S"),
        );
        println!("Billing Information");
        println!("{}", build_billing_table(&snapshot.billing));
        println!("{}", format_total_line(&snapshot.billing));
        self.print_series(&snapshot.series);
    }

    pub fn print_series(self, series: &ReconciledSeries) {
        if series.is_empty() {
            println!("{PLACEHOLDER}");
            return;
        }
        println!("kVAh Comparison");
        if self.coalesce {
            println!("{}", build_coalesced_table(&series.coalesce()));
        } else {
            println!("{}", build_series_table(series));
        }
        println!("{}", build_summary_table(&series.summary()));
    }

    pub fn print_placeholder(self) {
        println!("{PLACEHOLDER}");
    }
}

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        billing::{FormattedBilling, TOTAL_CHARGES},
        reconcile::{CoalescedPoint, ReconciledSeries, SeriesSummary},
    },
    quantity::energy::KilovoltAmpereHours,
};

/// Shown in place of the tables until the first successful refresh.
pub const PLACEHOLDER: &str = "Loading data…";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn value_cell(value: Option<KilovoltAmpereHours>, color: Color) -> Cell {
    let cell = match value {
        Some(value) => Cell::new(format!("{value:.2}")).fg(color),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    };
    cell.set_alignment(CellAlignment::Right)
}

pub fn build_billing_table(billing: &FormattedBilling) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Charge", "Amount"]);
    for line in &billing.lines {
        let label = Cell::new(&line.label);
        let amount = Cell::new(line.amount).set_alignment(CellAlignment::Right);
        if line.key == TOTAL_CHARGES {
            table.add_row(vec![
                label.add_attribute(Attribute::Bold),
                amount.add_attribute(Attribute::Bold),
            ]);
        } else {
            table.add_row(vec![label, amount]);
        }
    }
    table
}

/// The distinguished total line, printed apart from the billing table.
#[must_use]
pub fn format_total_line(billing: &FormattedBilling) -> String {
    format!("Total Charges: {}", billing.total)
}

pub fn build_series_table(series: &ReconciledSeries) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Time", "Actual", "Forecast"]);
    for point in series.iter() {
        table.add_row(vec![
            Cell::new(point.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(point.timestamp.format("%H:%M")),
            value_cell(point.actual(), Color::Blue),
            value_cell(point.forecast(), Color::Green),
        ]);
    }
    table
}

pub fn build_coalesced_table(rows: &[CoalescedPoint]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Time", "Actual", "Forecast"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(row.timestamp.format("%H:%M")),
            value_cell(row.actual, Color::Blue),
            value_cell(row.forecast, Color::Green),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &SeriesSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Points", "Total"]);
    table.add_row(vec![
        Cell::new("Actual kVAh"),
        Cell::new(summary.n_actual).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", summary.total_actual)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Forecasted kVAh"),
        Cell::new(summary.n_forecast).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", summary.total_forecast)).set_alignment(CellAlignment::Right),
    ]);
    if let Some(span) = &summary.span {
        table.add_row(vec![
            Cell::new("Span").add_attribute(Attribute::Dim),
            Cell::new(span.start().format("%Y-%m-%d %H:%M")),
            Cell::new(span.end().format("%Y-%m-%d %H:%M")),
        ]);
    }
    table
}

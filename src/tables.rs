use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};
use humantime::format_duration;

use crate::{db::summaries::DailySummary, quantity::energy::KilowattHours, statistics::report::RangeReport};

/// Render the range report for the terminal.
#[must_use]
pub fn report_table(report: &RangeReport) -> Table {
    let mut table = new_table(vec![
        Cell::from("Metric").add_attribute(Attribute::Bold),
        Cell::from("Value").set_alignment(CellAlignment::Right),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Window", format!("{:?}", report.window)),
        (
            "Duration",
            format_duration(report.window.duration().to_std().unwrap_or_default()).to_string(),
        ),
        ("Samples", report.sample_count.to_string()),
        ("Total", report.total.to_string()),
        ("Day rate", report.tariff.day.to_string()),
        ("Night rate", report.tariff.night.to_string()),
        ("Standby power", report.standby.standby_power.to_string()),
        ("Standby energy", report.standby.standby.to_string()),
        ("Active energy", report.standby.active.to_string()),
        (
            "Peak draw",
            report.peak.map_or_else(|| "n/a".to_string(), |peak| peak.to_string()),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::from(metric),
            Cell::from(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Render the trailing daily summaries for the terminal.
#[must_use]
pub fn usage_table(summaries: &[DailySummary]) -> Table {
    let mut table = new_table(vec![
        Cell::from("Date").add_attribute(Attribute::Bold),
        Cell::from("Day").set_alignment(CellAlignment::Right),
        Cell::from("Night").set_alignment(CellAlignment::Right),
        Cell::from("Total").set_alignment(CellAlignment::Right),
    ]);
    for summary in summaries {
        let total: KilowattHours = summary.day_use + summary.night_use;
        table.add_row(vec![
            Cell::from(summary.timestamp.with_timezone(&Local).format("%d %b %Y")),
            Cell::from(summary.day_use).set_alignment(CellAlignment::Right),
            Cell::from(summary.night_use).set_alignment(CellAlignment::Right),
            Cell::from(total).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling()
        .set_header(header);
    table
}

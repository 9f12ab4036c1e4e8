//! Sorting and rendering of analyzed accounts: aligned table, CSV, JSON.

use std::cmp::Ordering;

use clap::ValueEnum;
use profilescan_core::AccountRecord;

const CSV_HEADERS: [&str; 8] = [
    "Name",
    "Handle",
    "Followers",
    "Average Views",
    "Category",
    "Engagement Rate",
    "Location",
    "Error",
];

const TABLE_HEADERS: [&str; 8] = [
    "Name",
    "Handle",
    "Followers",
    "Avg Views",
    "Category",
    "Engagement",
    "Location",
    "Error",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortKey {
    Name,
    Handle,
    Followers,
    AverageViews,
    Category,
    EngagementRate,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Ascending,
    Descending,
}

/// Stable sort by `key`. Absent values order below every present value, so
/// they land at the bottom of a descending sort.
pub(crate) fn sort_accounts(rows: &mut [AccountRecord], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by(a: &AccountRecord, b: &AccountRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Handle => a.handle.cmp(&b.handle),
        SortKey::Followers => a.followers.cmp(&b.followers),
        SortKey::AverageViews => a.average_views.cmp(&b.average_views),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::EngagementRate => match (a.engagement_rate, b.engagement_rate) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
        SortKey::Location => a.location.cmp(&b.location),
    }
}

/// `689_000_000` → `"689.00M"`, `7_123` → `"7.1K"`, `42` → `"42"`, absent → `"?"`.
#[allow(clippy::cast_precision_loss)] // display rounding only
pub(crate) fn format_count(value: Option<u64>) -> String {
    match value {
        None => "?".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.2}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        Some(n) => n.to_string(),
    }
}

/// `0.0125` → `"1.25%"`.
fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn table_row(r: &AccountRecord) -> [String; 8] {
    [
        r.name.clone().unwrap_or_else(|| "?".to_string()),
        format!("@{}", r.handle),
        format_count(r.followers),
        format_count(r.average_views),
        r.category.clone().unwrap_or_else(|| "?".to_string()),
        r.engagement_rate
            .map_or_else(|| "?".to_string(), format_rate),
        r.location.clone().unwrap_or_else(|| "?".to_string()),
        r.error.clone().unwrap_or_default(),
    ]
}

/// Column-aligned plain-text table with a header and rule line.
pub(crate) fn render_table(rows: &[AccountRecord]) -> String {
    let body: Vec<[String; 8]> = rows.iter().map(table_row).collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    push_line(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// CSV export with every field quoted. Absent values are empty strings.
///
/// # Errors
///
/// Returns an error if the in-memory writer fails.
pub(crate) fn to_csv(rows: &[AccountRecord]) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for r in rows {
        writer.write_record([
            r.name.clone().unwrap_or_default(),
            r.handle.clone(),
            r.followers.map(|n| n.to_string()).unwrap_or_default(),
            r.average_views.map(|n| n.to_string()).unwrap_or_default(),
            r.category.clone().unwrap_or_default(),
            r.engagement_rate.map(format_rate).unwrap_or_default(),
            r.location.clone().unwrap_or_default(),
            r.error.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

/// `{"accounts": [...]}`, the same shape the server returns.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn to_json(rows: &[AccountRecord]) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(&serde_json::json!({ "accounts": rows }))?;
    json.push('\n');
    Ok(json)
}

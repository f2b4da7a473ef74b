use anyhow::{Context, Result};

use crate::errors::{AnalyticsError, AppError};
use crate::models::NormalizedSeries;

/// Serialize an aligned pair of normalized series as CSV.
///
/// One row per date: `Date,<ticker1>,<ticker2>`. Values use Rust's default
/// float formatting, which round-trips exactly through `parse::<f64>()`.
/// The inputs must share a date index; misalignment is an error, not a
/// truncated file.
pub fn export_comparison(
    a: &NormalizedSeries,
    b: &NormalizedSeries,
) -> Result<String, AppError> {
    if a.points.len() != b.points.len()
        || a.points
            .iter()
            .zip(b.points.iter())
            .any(|(pa, pb)| pa.date != pb.date)
    {
        return Err(AnalyticsError::MisalignedSeries(format!(
            "cannot export {} and {} to CSV: date indices differ",
            a.ticker, b.ticker
        ))
        .into());
    }

    write_rows(a, b).map_err(|e| AppError::Internal(e.to_string()))
}

fn write_rows(a: &NormalizedSeries, b: &NormalizedSeries) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", a.ticker.as_str(), b.ticker.as_str()])
        .context("write csv header")?;

    for (pa, pb) in a.points.iter().zip(b.points.iter()) {
        writer
            .write_record([
                pa.date.to_string(),
                pa.value.to_string(),
                pb.value.to_string(),
            ])
            .context("write csv row")?;
    }

    let bytes = writer.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output was not utf-8")
}

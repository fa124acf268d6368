use std::io::{self, Write};

use regression::{Snapshot, params::X_DOMAIN};

/// Writes the CRISP-DM walkthrough of a snapshot.
///
/// # Arguments
/// * `out` - Where the report is written.
/// * `snapshot` - The dataset, fit and evaluation to describe.
/// * `preview_rows` - How many prepared rows to show.
pub fn write_report<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    preview_rows: usize,
) -> io::Result<()> {
    let Snapshot {
        params,
        dataset,
        fit,
        evaluation,
    } = snapshot;

    writeln!(out, "Interactive simple linear regression")?;
    writeln!(
        out,
        "Following CRISP-DM: generate data from a known line, fit it, compare."
    )?;

    section(out, "1. Data understanding")?;
    writeln!(out, "true line     y = {:.2}x {:+.2}", params.slope, params.intercept)?;
    writeln!(out, "noise std dev {:.2}", params.noise_std_dev)?;
    writeln!(
        out,
        "{} points with x evenly spaced over [{}, {}]",
        dataset.len(),
        X_DOMAIN.0,
        X_DOMAIN.1
    )?;
    let (y_min, y_max) = dataset
        .y_observed()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| {
            (lo.min(y), hi.max(y))
        });
    writeln!(out, "observed y ranges over [{y_min:.2}, {y_max:.2}]")?;

    section(out, "2. Data preparation")?;
    writeln!(out, "feature x, target y (first {preview_rows} rows)")?;
    writeln!(out, "{:>10} {:>10}", "x", "y")?;
    for sample in dataset.head(preview_rows) {
        writeln!(out, "{:>10.4} {:>10.4}", sample.x, sample.y_observed)?;
    }

    section(out, "3. Modeling")?;
    writeln!(out, "ordinary least squares on {} samples", fit.n)?;
    writeln!(out, "fitted line   y = {:.2}x {:+.2}", fit.slope, fit.intercept)?;

    section(out, "4. Evaluation")?;
    for metric in evaluation.summary() {
        match metric.formatted_delta() {
            Some(delta) => writeln!(
                out,
                "{:<22} {:>10} ({delta} from the true value)",
                metric.label,
                metric.formatted_value()
            )?,
            None => writeln!(out, "{:<22} {:>10}", metric.label, metric.formatted_value())?,
        }
    }
    writeln!(out, "{:<22} {:>10.3}", "RMSE", fit.rmse())?;
    writeln!(
        out,
        "R-squared is the share of the variance of y explained by the line, closer to 1 is better."
    )?;

    section(out, "5. Deployment")?;
    writeln!(
        out,
        "Edit the JSON config (or CRISPDM_SEED) and run again to watch every stage change."
    )?;

    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {title}")
}

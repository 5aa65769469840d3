//! Plain-text progress bar and horizontal bar chart.

use std::io::Write;

/// `[#####.....]` filled in proportion to `fraction`, clamped to [0, 1]
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let filled = ((f * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Signed horizontal bars, one row per `(label, value)`, scaled to the largest magnitude.
/// Positive values draw `+`, negative values draw `-`.
pub fn bar_chart(
    w: &mut impl Write,
    title: &str,
    x_label: &str,
    rows: &[(String, f64)],
    width: usize,
) -> std::io::Result<()> {
    writeln!(w, "{}", title)?;
    writeln!(w, "{}", "-".repeat(title.len()))?;
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let max_abs = rows
        .iter()
        .map(|(_, v)| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);

    for (label, value) in rows {
        let len = if max_abs > 0.0 && value.is_finite() {
            ((value.abs() / max_abs) * width as f64).round() as usize
        } else {
            0
        };
        let glyph = if *value < 0.0 { "-" } else { "+" };
        writeln!(
            w,
            "{:<lw$} | {:<bw$} {:+.4}",
            label,
            glyph.repeat(len.min(width)),
            value,
            lw = label_width,
            bw = width
        )?;
    }
    writeln!(w, "{:<lw$}   {}", "", x_label, lw = label_width)?;
    Ok(())
}

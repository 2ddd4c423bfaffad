//! Text bar charts
//!
//! Renders breakdown rows as horizontal bars scaled to the largest total.

use crate::reports::breakdown::ScaledRow;

/// Shown in place of a chart with no rows
pub const NO_CHART_DATA: &str = "No data available for selected filters";

const BAR: char = '█';

/// Number of bar cells for a share of the largest total. A non-zero share
/// always gets at least one cell.
pub fn bar_length(share: f64, width: usize) -> usize {
    if share <= 0.0 || width == 0 {
        return 0;
    }
    let cells = (share.min(1.0) * width as f64).round() as usize;
    cells.max(1)
}

/// Render a titled bar chart
pub fn render_bar_chart(title: &str, rows: &[ScaledRow<'_>], symbol: &str, width: usize) -> String {
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(title.chars().count()));
    output.push('\n');

    if rows.is_empty() {
        output.push_str(NO_CHART_DATA);
        output.push('\n');
        return output;
    }

    let key_width = rows
        .iter()
        .map(|r| r.row.key.chars().count())
        .max()
        .unwrap_or(0);

    for scaled in rows {
        let bar: String = std::iter::repeat(BAR)
            .take(bar_length(scaled.share, width))
            .collect();
        output.push_str(&format!(
            "{:<key_width$}  {:<width$}  {}\n",
            scaled.row.key,
            bar,
            scaled.row.total.format_with_symbol(symbol),
        ));
    }

    output
}

//! Result card for an accepted classification.

use crate::presenter::{ResultView, INDICATOR_CELLS};
use crate::ui::helpers::indicator_bar;
use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Renders the bin label in its category color, the confidence bar and
/// the emissions message.
///
/// # Layout
///
/// ```text
/// Bin: Recyclable
/// Confidence: ██████████████████░░ 92.0%
/// You've helped avoid approximately 0.5 kg of CO₂ emissions ...
/// ```
pub fn render_result<W: Write>(out: &mut W, result: &ResultView, theme: &Theme) -> io::Result<()> {
    let color = theme.fg(theme.category_color(result.category));
    let label = if result.label.is_empty() {
        "(unlabelled)"
    } else {
        &result.label
    };

    writeln!(out, "{}Bin:{} {color}{label}{}", theme.bold(), theme.reset(), theme.reset())?;

    let (filled, empty) = indicator_bar(result.indicator_cells, INDICATOR_CELLS);
    writeln!(
        out,
        "Confidence: {color}{filled}{}{}{empty}{} {}",
        theme.reset(),
        theme.fg(&theme.colors.indicator_empty),
        theme.reset(),
        result.confidence_percent
    )?;

    writeln!(
        out,
        "{}{}{}",
        theme.fg(&theme.colors.organic_fg),
        result.emissions_message,
        theme.reset()
    )
}

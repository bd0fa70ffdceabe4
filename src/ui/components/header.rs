//! Header component renderer.

use crate::ui::helpers::{center, rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Renders the centered title, the phase name and a separator.
///
/// # Layout
///
/// ```text
///                            BinSmart
///                             [ready]
/// ────────────────────────────────────────────────────────────────
/// ```
pub fn render_header<W: Write>(
    out: &mut W,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}{}",
        theme.bold(),
        theme.fg(&theme.colors.header_fg),
        center(&header.title, cols),
        theme.reset()
    )?;
    writeln!(
        out,
        "{}{}{}",
        theme.fg(&theme.colors.text_dim),
        center(&format!("[{}]", header.status), cols),
        theme.reset()
    )?;
    writeln!(out, "{}{}{}", theme.dim(), rule(cols), theme.reset())
}

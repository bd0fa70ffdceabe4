//! Footer component renderer.

use crate::ui::helpers::rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders a separator, the dimmed command hints and the credits line.
pub fn render_footer<W: Write>(
    out: &mut W,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    writeln!(out, "{}{}{}", theme.dim(), rule(cols), theme.reset())?;
    let dim = theme.fg(&theme.colors.text_dim);
    writeln!(out, "{dim}{}{}", footer.keybindings, theme.reset())?;
    writeln!(out, "{dim}{}{}", footer.credits, theme.reset())
}

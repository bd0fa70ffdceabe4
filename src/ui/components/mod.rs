//! Composable UI component renderers.
//!
//! Each component writes one section of the screen to any [`std::io::Write`]
//! sink, so tests can render into a `Vec<u8>`.
//!
//! # Components
//!
//! - `header`: title and phase
//! - `image`: live image details and the submit affordance
//! - `result`: bin label, confidence bar, emissions message
//! - `footer`: command hints

mod footer;
mod header;
mod image;
mod result;

pub use footer::render_footer;
pub use header::render_header;
pub use image::render_image;
pub use result::render_result;

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Renders the failure message of the last submission.
pub fn render_error<W: Write>(out: &mut W, message: &str, theme: &Theme) -> io::Result<()> {
    writeln!(
        out,
        "{}{message}{}",
        theme.fg(&theme.colors.error_fg),
        theme.reset()
    )
}

/// Renders queued one-time notices.
pub fn render_notices<W: Write>(out: &mut W, notices: &[String], theme: &Theme) -> io::Result<()> {
    for notice in notices {
        writeln!(
            out,
            "{}! {notice}{}",
            theme.fg(&theme.colors.notice_fg),
            theme.reset()
        )?;
    }
    Ok(())
}

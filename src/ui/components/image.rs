//! Image panel: the live image and the submit affordance.

use crate::ui::helpers::human_size;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ImageInfo, SubmitInfo};
use std::io::{self, Write};

pub fn render_image<W: Write>(
    out: &mut W,
    image: Option<&ImageInfo>,
    submit: &SubmitInfo,
    theme: &Theme,
) -> io::Result<()> {
    let Some(image) = image else {
        writeln!(
            out,
            "{}No image selected. Upload an image or take a photo.{}",
            theme.fg(&theme.colors.text_dim),
            theme.reset()
        )?;
        return Ok(());
    };

    let name = image.file_name.as_deref().unwrap_or("(unnamed)");
    writeln!(
        out,
        "{}Image:{} {name} ({} from {}, {})",
        theme.bold(),
        theme.reset(),
        image.mime_type,
        image.source,
        human_size(image.size_bytes)
    )?;

    if let Some((width, height)) = image.dimensions {
        writeln!(out, "  {width}x{height} px, captured {}", image.captured_at)?;
    } else {
        writeln!(out, "  captured {}", image.captured_at)?;
    }

    writeln!(
        out,
        "  {}preview: {}{}",
        theme.fg(&theme.colors.text_dim),
        image.preview,
        theme.reset()
    )?;

    if submit.enabled {
        writeln!(out, "{}[ {} ]{}", theme.bold(), submit.label, theme.reset())
    } else {
        writeln!(out, "{}[ {} ]{}", theme.dim(), submit.label, theme.reset())
    }
}

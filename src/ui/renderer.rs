//! Top-level rendering coordinator.
//!
//! Rendering is a pure function of the view model and the theme. The
//! interactive loop redraws after every event that changed state.
//!
//! # Example
//!
//! ```rust
//! use binsmart::app::AppState;
//! use binsmart::ui::{render, Theme};
//!
//! let vm = AppState::new().compute_viewmodel();
//! let mut out = Vec::new();
//! render(&vm, &Theme::default().without_color(), &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("No image selected"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::ui::components;
use crate::ui::helpers::LAYOUT_COLS;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ScreenViewModel;
use std::io::{self, Write};

/// Writes the whole screen for `vm` to `out`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render<W: Write>(vm: &ScreenViewModel, theme: &Theme, out: &mut W) -> io::Result<()> {
    components::render_header(out, &vm.header, theme, LAYOUT_COLS)?;
    components::render_notices(out, &vm.notices, theme)?;
    components::render_image(out, vm.image.as_ref(), &vm.submit, theme)?;

    if let Some(message) = &vm.error {
        components::render_error(out, message, theme)?;
    }
    if let Some(result) = &vm.result {
        writeln!(out)?;
        components::render_result(out, result, theme)?;
    }

    components::render_footer(out, &vm.footer, theme, LAYOUT_COLS)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CaptureSource, ClassificationResponse};
    use crate::presenter;
    use crate::ui::viewmodel::{FooterInfo, HeaderInfo, ImageInfo, SubmitInfo};

    fn screen() -> ScreenViewModel {
        ScreenViewModel {
            header: HeaderInfo {
                title: "BinSmart".into(),
                status: "succeeded".into(),
            },
            image: Some(ImageInfo {
                preview: "/tmp/preview-1.png".into(),
                source: CaptureSource::File,
                file_name: Some("bottle.png".into()),
                mime_type: "image/png",
                size_bytes: 2048,
                dimensions: Some((640, 480)),
                captured_at: "12:00:00".into(),
            }),
            submit: SubmitInfo {
                enabled: false,
                label: "Classify Waste".into(),
            },
            error: None,
            result: Some(presenter::present(&ClassificationResponse {
                prediction: "Recyclable".into(),
                confidence: 0.92,
            })),
            notices: vec![],
            footer: FooterInfo {
                keybindings: "reset  quit".into(),
                credits: presenter::credits(2026),
            },
        }
    }

    fn rendered(vm: &ScreenViewModel, theme: &Theme) -> String {
        let mut out = Vec::new();
        render(vm, theme, &mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn result_screen_shows_label_percent_and_emissions() {
        let text = rendered(&screen(), &Theme::default().without_color());
        assert!(text.contains("Bin: Recyclable"));
        assert!(text.contains("92.0%"));
        assert!(text.contains("0.5 kg of CO₂"));
        assert!(text.contains("bottle.png"));
        assert!(text.contains("640x480"));
        assert!(text.contains("2.0 KiB"));
        assert!(text.contains("© 2026 BinSmart"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn label_uses_category_color() {
        let text = rendered(&screen(), &Theme::default());
        assert!(text.contains("\u{1b}[38;2;96;165;250mRecyclable"));
    }

    #[test]
    fn error_and_notices_are_shown() {
        let mut vm = screen();
        vm.result = None;
        vm.error = Some("Error: 500".into());
        vm.notices = vec!["heads up".into()];

        let text = rendered(&vm, &Theme::default().without_color());
        assert!(text.contains("Error: 500"));
        assert!(text.contains("! heads up"));
        assert!(!text.contains("Bin:"));
    }

    #[test]
    fn processing_label_is_rendered() {
        let mut vm = screen();
        vm.result = None;
        vm.submit.label = "Processing...".into();
        let text = rendered(&vm, &Theme::default().without_color());
        assert!(text.contains("[ Processing... ]"));
    }
}

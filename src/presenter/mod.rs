//! Display data derived from an accepted classification.
//!
//! Pure functions only; nothing here holds state. The terminal renderer and
//! the `--json` output both consume [`ResultView`].

use crate::domain::ClassificationResponse;
use serde::Serialize;

/// Estimated CO₂ saved per correctly sorted item, in kilograms.
pub const CO2_SAVING_KG: f64 = 0.5;

/// Width of the confidence bar in terminal cells.
pub const INDICATOR_CELLS: usize = 20;

/// Shown once a confident result is displayed.
pub const EMISSIONS_MESSAGE: &str =
    "You've helped avoid approximately 0.5 kg of CO₂ emissions by disposing waste correctly!";

/// Shown instead of a result when the confidence gate rejects it.
pub const LOW_CONFIDENCE_ADVISORY: &str = "The model is not confident enough about this classification. \
     We're working on deploying an even stronger model to improve predictions.";

/// Informational blurb about why sorting matters.
pub const ABOUT_TEXT: &str = "Waste classification helps reduce contamination, enables recycling, \
     and minimizes landfill usage. Proper classification can significantly lower carbon emissions, \
     saving up to 0.5 kg of CO₂ per item correctly sorted. Be part of the solution to environmental \
     pollution and climate change by using smart tools like BinSmart.";

/// Where users can reach the BinSmart team.
pub const CONTACT_EMAIL: &str = "apoorva-sanjay.rumale.462@my.csun.edu";

/// Copyright and contact line for the footer.
///
/// # Examples
///
/// ```
/// let line = binsmart::presenter::credits(2026);
/// assert!(line.starts_with("© 2026 BinSmart"));
/// ```
#[must_use]
pub fn credits(year: i32) -> String {
    format!("© {year} BinSmart · Contact us: {CONTACT_EMAIL}")
}

/// Presentation category of a bin label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCategory {
    Recyclable,
    Organic,
    Other,
}

impl BinCategory {
    /// Categorizes a prediction label by case-insensitive substring.
    ///
    /// Unknown labels fall back to [`BinCategory::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use binsmart::presenter::BinCategory;
    ///
    /// assert_eq!(BinCategory::from_label("Recyclable"), BinCategory::Recyclable);
    /// assert_eq!(BinCategory::from_label("FOOD waste"), BinCategory::Organic);
    /// assert_eq!(BinCategory::from_label("Landfill"), BinCategory::Other);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("recycle") {
            Self::Recyclable
        } else if label.contains("food") || label.contains("organic") {
            Self::Organic
        } else {
            Self::Other
        }
    }
}

/// Everything needed to show one accepted result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    /// Label exactly as the service returned it.
    pub label: String,
    pub category: BinCategory,
    /// Confidence as a percentage with one decimal, e.g. `"92.0%"`.
    pub confidence_percent: String,
    /// Confidence clamped to `[0, 1]`, for proportional indicators.
    pub indicator_fraction: f64,
    /// Filled cells out of [`INDICATOR_CELLS`].
    pub indicator_cells: usize,
    pub emissions_message: &'static str,
}

/// Derives the display data for an accepted response.
#[must_use]
pub fn present(response: &ClassificationResponse) -> ResultView {
    let fraction = response.confidence.clamp(0.0, 1.0);

    ResultView {
        label: response.prediction.clone(),
        category: BinCategory::from_label(&response.prediction),
        confidence_percent: format_percent(response.confidence),
        indicator_fraction: fraction,
        indicator_cells: indicator_cells(fraction),
        emissions_message: EMISSIONS_MESSAGE,
    }
}

/// Formats a `[0, 1]` confidence as a one-decimal percentage.
///
/// The tenths digit rounds half away from zero.
#[must_use]
pub fn format_percent(confidence: f64) -> String {
    let tenths = (confidence * 100.0 * 10.0).round() / 10.0;
    format!("{tenths:.1}%")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn indicator_cells(fraction: f64) -> usize {
    ((fraction * INDICATOR_CELLS as f64).round() as usize).min(INDICATOR_CELLS)
}

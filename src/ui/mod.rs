//! Terminal user interface.
//!
//! Transforms view models into ANSI-styled text.
//!
//! ```text
//! AppState → compute_viewmodel → ScreenViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Section renderers
//! - [`helpers`]: Layout and formatting utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FooterInfo, HeaderInfo, ImageInfo, ScreenViewModel, SubmitInfo};

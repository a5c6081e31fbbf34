//! Placard renders event posters and social banners from a structured event
//! description.
//!
//! Given a config record (three sub-events with text, optional backdrop image
//! and overlay color, plus date/venue strings), Placard composes a fixed
//! visual template of three triangular panels and constant branding onto a
//! normalized-coordinate canvas and rasterizes it to PNG via a CPU backend.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`PosterConfig::from_path`] parses and validates the record.
//! 2. **Parameterize**: [`Variant::layout`] picks the per-variant
//!    [`LayoutParameters`] table (canvas size, element anchors, feature
//!    flags, panel geometry strategy).
//! 3. **Render**: [`render_variant`] composes panels, practical info and
//!    constant branding onto a [`Canvas`] and yields a [`FrameRGBA`].
//! 4. **Encode**: [`write_png`] writes the frame to disk.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: a render is a pure function of the config, the layout
//!   table and the installed fonts; the two variants share one draw routine.
//! - **No partial output**: any missing asset or invalid config aborts the
//!   whole render before a file is written.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod layout;
mod render;

pub use assets::decode::{PreparedImage, decode_image};
pub use assets::store::{AssetStore, ImagePaint};
pub use config::color::{ColorSpec, Rgba, parse_hex};
pub use config::model::{PANEL_COUNT, PanelSpec, PosterConfig};
pub use foundation::error::{PlacardError, PlacardResult};
pub use layout::params::{IconParams, LayoutParameters, TextParams};
pub use layout::shape::{BREAKPOINTS, PanelPathStrategy};
pub use render::canvas::{Canvas, FrameRGBA};
pub use render::pipeline::{Variant, render_both, render_variant, write_png};
pub use render::template::{LOGO_CI, LOGO_LAB, QR_CODE, render};
pub use render::text::{
    LINE_PITCH, PANEL_STAGGER, SHADOW_OFFSET, TextBrush, TextLayoutEngine, TextStyle,
};

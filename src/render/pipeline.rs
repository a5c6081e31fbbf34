use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::store::AssetStore;
use crate::config::model::PosterConfig;
use crate::foundation::error::PlacardResult;
use crate::layout::params::LayoutParameters;
use crate::render::canvas::FrameRGBA;
use crate::render::template;
use crate::render::text::TextLayoutEngine;

/// The two output formats sharing one rendering algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Print-format poster.
    Poster,
    /// Landscape social-media banner.
    Banner,
}

impl Variant {
    /// Build this variant's layout table for the given config.
    ///
    /// Only the poster honors the config's canvas override; the banner always
    /// renders at its fixed dimensions.
    pub fn layout(self, config: &PosterConfig) -> LayoutParameters {
        match self {
            Variant::Poster => {
                LayoutParameters::poster().with_canvas(config.width, config.height)
            }
            Variant::Banner => LayoutParameters::banner(),
        }
    }

    /// Derive this variant's output file name from the input config path:
    /// the poster swaps the extension for `.png`, the banner appends `-fb`.
    pub fn output_path(self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "poster".to_string());
        let name = match self {
            Variant::Poster => format!("{stem}.png"),
            Variant::Banner => format!("{stem}-fb.png"),
        };
        input.with_file_name(name)
    }
}

/// Render one variant of `config`, loading assets relative to `assets_root`.
#[tracing::instrument(skip(config))]
pub fn render_variant(
    config: &PosterConfig,
    variant: Variant,
    assets_root: &Path,
) -> PlacardResult<FrameRGBA> {
    let params = variant.layout(config);
    let mut assets = AssetStore::new(assets_root);
    let mut text = TextLayoutEngine::new();
    template::render(config, &params, &mut assets, &mut text)
}

/// Render both variants of one config. The renders are independent (separate
/// canvas, asset store and text engine each), so they run on a rayon join.
pub fn render_both(
    config: &PosterConfig,
    assets_root: &Path,
) -> PlacardResult<(FrameRGBA, FrameRGBA)> {
    let (poster, banner) = rayon::join(
        || render_variant(config, Variant::Poster, assets_root),
        || render_variant(config, Variant::Banner, assets_root),
    );
    Ok((poster?, banner?))
}

/// Encode a frame as a PNG file, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> PlacardResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

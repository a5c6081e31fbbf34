use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::foundation::error::{PlacardError, PlacardResult};

/// A decoded bitmap wrapped as a `vello_cpu` paint, plus its pixel size.
#[derive(Clone, Debug)]
pub struct ImagePaint {
    /// Paint source handed to the render context.
    pub paint: vello_cpu::Image,
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
}

/// Path-keyed cache of decoded image assets, rooted at one directory.
///
/// All file IO for a render call goes through here; the renderer itself never
/// touches the filesystem. A store belongs to a single render call and is not
/// shared across concurrent renders.
pub struct AssetStore {
    root: PathBuf,
    images: HashMap<String, ImagePaint>,
}

impl AssetStore {
    /// Create a store resolving relative asset paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Load (or fetch from cache) the image at `rel`, relative to the store
    /// root. An unreadable or undecodable file is a fatal
    /// [`PlacardError::MissingAsset`].
    pub fn image(&mut self, rel: &str) -> PlacardResult<ImagePaint> {
        if let Some(paint) = self.images.get(rel) {
            return Ok(paint.clone());
        }

        let path = self.root.join(Path::new(rel));
        let bytes = std::fs::read(&path)
            .map_err(|e| PlacardError::missing_asset(rel, e))?;
        let prepared =
            decode_image(&bytes).map_err(|e| PlacardError::missing_asset(rel, e))?;

        let pixmap = pixmap_from_premul_bytes(
            &prepared.rgba8_premul,
            prepared.width,
            prepared.height,
        )?;
        let paint = ImagePaint {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: prepared.width,
            height: prepared.height,
        };

        self.images.insert(rel.to_string(), paint.clone());
        Ok(paint)
    }
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PlacardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PlacardError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PlacardError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PlacardError::validation(
            "prepared image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

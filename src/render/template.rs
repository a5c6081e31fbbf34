use kurbo::Point;

use crate::assets::store::AssetStore;
use crate::config::color::Rgba;
use crate::config::model::{PanelSpec, PosterConfig};
use crate::foundation::error::PlacardResult;
use crate::layout::params::{IconParams, LayoutParameters, TextParams};
use crate::layout::shape::BREAKPOINTS;
use crate::render::canvas::{Canvas, FrameRGBA};
use crate::render::text::{PANEL_STAGGER, TextLayoutEngine, TextStyle};

/// Cercle Informatique logo, resolved against the asset store root.
pub const LOGO_CI: &str = "logo_CI.png";
/// UrLab hackerspace logo.
pub const LOGO_LAB: &str = "urlab.png";
/// QR code pointing at the series page.
pub const QR_CODE: &str = "smartMondayQR.png";

const TITLE_TEXT: &str = "SmartMonday";
const DESCRIPTION_TEXT: &str = "Conférences\ngratuites en français";
const URL_TEXT: &str = "http://urlab.be/sm";
const DISCLAIMER_TEXT: &str = "Entrée libre, dans la limite des places disponibles";

const PLACE_COLOR: Rgba = Rgba {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};
const DATE_COLOR: Rgba = Rgba {
    r: 1.0,
    g: 0.1,
    b: 0.3,
    a: 1.0,
};
const DISCLAIMER_COLOR: Rgba = Rgba {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Compose one validated config onto a fresh canvas and rasterize it.
///
/// Draw order is a design invariant, not an accident: panels first, then
/// practical info, then constant branding. Later draws overlay earlier ones,
/// and translucent fills composite visibly against what is already there.
#[tracing::instrument(skip_all, fields(w = params.width, h = params.height))]
pub fn render(
    config: &PosterConfig,
    params: &LayoutParameters,
    assets: &mut AssetStore,
    text: &mut TextLayoutEngine,
) -> PlacardResult<FrameRGBA> {
    config.validate()?;

    let mut canvas = Canvas::new(params.width, params.height)?;

    for (i, panel) in config.conferences.iter().enumerate() {
        draw_panel(&mut canvas, text, assets, config, params, panel, i)?;
    }
    draw_practical_info(&mut canvas, text, config, params)?;
    draw_constant_branding(&mut canvas, text, assets, config, params)?;

    Ok(canvas.finish())
}

/// One triangular panel: backdrop image (clipped), overlay color, white
/// perimeter, announcement text.
fn draw_panel(
    canvas: &mut Canvas,
    text: &mut TextLayoutEngine,
    assets: &mut AssetStore,
    config: &PosterConfig,
    params: &LayoutParameters,
    panel: &PanelSpec,
    index: usize,
) -> PlacardResult<()> {
    // Panels alternate their anchor edge: right, left, right.
    let x = ((index + 1) % 2) as f64;
    let (y1, y2) = (BREAKPOINTS[index], BREAKPOINTS[index + 2]);
    let mid = (y1 + y2) / 2.0;
    let path = params.path_strategy.panel_path(x, y1, y2);

    if params.show_panel_images
        && let Some(rel) = panel.image.as_deref()
    {
        let image = assets.image(rel)?;
        let origin = params.path_strategy.image_origin(y1);
        canvas.saved(|c| {
            c.clip(&path);
            c.translate(origin.x, origin.y);
            // Uniform scale mapping the source width to one normalized unit;
            // sources are assumed pre-cropped to a compatible aspect ratio.
            let r = 1.0 / f64::from(image.width);
            c.scale(r, r);
            c.draw_image(&image);
            Ok(())
        })?;
    }

    let overlay = match &panel.color {
        Some(spec) => spec.resolve(params.panel_alpha)?,
        None => Rgba {
            a: params.panel_alpha,
            ..Rgba::WHITE
        },
    };
    canvas.fill(&path, overlay);
    canvas.stroke(&path, Rgba::WHITE, params.panel_stroke_width);

    if params.panel_text_size > 0.0 {
        let anchor = if x == 0.0 {
            Point::new(0.05, mid - 0.05)
        } else {
            Point::new(0.3, mid + 0.01)
        };
        let block = panel.display_text()?;
        text.draw_block(
            canvas,
            &config.font,
            &block,
            &TextParams {
                size: params.panel_text_size,
                anchor,
            },
            &TextStyle {
                color: Rgba::WHITE,
                shadow: true,
                stagger: PANEL_STAGGER,
            },
        )?;
    }

    Ok(())
}

/// Venue and date lines, in that fixed order.
fn draw_practical_info(
    canvas: &mut Canvas,
    text: &mut TextLayoutEngine,
    config: &PosterConfig,
    params: &LayoutParameters,
) -> PlacardResult<()> {
    text.draw_block(
        canvas,
        &config.font,
        &config.location,
        &params.place,
        &TextStyle {
            shadow: params.place_has_shadow,
            ..TextStyle::plain(PLACE_COLOR)
        },
    )?;
    text.draw_block(
        canvas,
        &config.font,
        &config.date,
        &params.date,
        &TextStyle::plain(DATE_COLOR),
    )
}

/// Static elements common to every output: headline, series description,
/// URL, disclaimer, the two logos and the QR code.
fn draw_constant_branding(
    canvas: &mut Canvas,
    text: &mut TextLayoutEngine,
    assets: &mut AssetStore,
    config: &PosterConfig,
    params: &LayoutParameters,
) -> PlacardResult<()> {
    canvas.saved(|c| {
        c.scale(params.constant_scale_x, 1.0);
        text.draw_block(
            c,
            &config.font,
            TITLE_TEXT,
            &params.title,
            &TextStyle::plain(Rgba::BLACK),
        )?;
        text.draw_block(
            c,
            &config.font,
            DESCRIPTION_TEXT,
            &params.description,
            &TextStyle::plain(Rgba::BLACK),
        )?;
        text.draw_block(
            c,
            &config.font,
            URL_TEXT,
            &params.url,
            &TextStyle::plain(Rgba::BLACK),
        )?;
        text.draw_block(
            c,
            &config.font,
            DISCLAIMER_TEXT,
            &params.disclaimer,
            &TextStyle::plain(DISCLAIMER_COLOR),
        )
    })?;

    draw_icon(canvas, assets, LOGO_CI, &params.logo_ci)?;
    draw_icon(canvas, assets, LOGO_LAB, &params.logo_lab)?;
    draw_icon(canvas, assets, QR_CODE, &params.qr)
}

/// Paint a fixed branding image at its configured anchor. The width maps to
/// `icon.size` normalized units; the height scales by the same factor
/// corrected for the canvas aspect, preserving source pixel aspect.
fn draw_icon(
    canvas: &mut Canvas,
    assets: &mut AssetStore,
    rel: &str,
    icon: &IconParams,
) -> PlacardResult<()> {
    let image = assets.image(rel)?;
    canvas.saved(|c| {
        c.translate(icon.anchor.x, icon.anchor.y);
        let rw = icon.size / f64::from(image.width);
        let rh = rw * f64::from(c.width()) / f64::from(c.height());
        c.scale(rw, rh);
        c.draw_image(&image);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::color::ColorSpec;
    use crate::foundation::error::PlacardError;

    fn write_png(dir: &Path, name: &str, rgba: [u8; 4]) {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.join(name), &buf).unwrap();
    }

    fn scratch_assets(test: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("template_tests").join(test);
        std::fs::create_dir_all(&dir).unwrap();
        for name in [LOGO_CI, LOGO_LAB, QR_CODE] {
            write_png(&dir, name, [0, 0, 255, 255]);
        }
        dir
    }

    fn minimal_config() -> PosterConfig {
        serde_json::from_value(serde_json::json!({
            "conferences": [
                { "text": "A" },
                { "text": "B" },
                { "text": "C" },
            ]
        }))
        .unwrap()
    }

    fn small_poster() -> LayoutParameters {
        LayoutParameters::poster().with_canvas(Some(210), Some(297))
    }

    fn pixel(frame: &FrameRGBA, x: f64, y: f64) -> [u8; 4] {
        let px = (x * f64::from(frame.width)) as u32;
        let py = (y * f64::from(frame.height)) as u32;
        let i = ((py * frame.width + px) * 4) as usize;
        [
            frame.data[i],
            frame.data[i + 1],
            frame.data[i + 2],
            frame.data[i + 3],
        ]
    }

    fn assert_close(px: [u8; 4], want: [u8; 4], tol: u8) {
        for (got, want) in px.iter().zip(want) {
            assert!(
                got.abs_diff(want) <= tol,
                "pixel {px:?} not within {tol} of {want:?}"
            );
        }
    }

    #[test]
    fn hex_panel_blends_over_white_inside_the_triangle_only() {
        let dir = scratch_assets("hex_panel");
        let mut config = minimal_config();
        config.conferences[0].color = Some(ColorSpec::Hex("#336699".to_string()));

        let frame = render(
            &config,
            &small_poster(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap();

        assert_eq!((frame.width, frame.height), (210, 297));
        // 50% of #336699 over the white background, inside panel 0.
        assert_close(pixel(&frame, 0.95, 0.3), [153, 178, 204, 255], 3);
        // Below every panel and outside all text/icons: still white.
        assert_close(pixel(&frame, 0.65, 0.995), [255, 255, 255, 255], 1);
    }

    #[test]
    fn opaque_overlay_hides_the_backdrop_image() {
        let dir = scratch_assets("opaque_overlay");
        write_png(&dir, "green.png", [0, 255, 0, 255]);

        let mut config = minimal_config();
        config.conferences[0].image = Some("green.png".to_string());
        config.conferences[0].color = Some(ColorSpec::Components(vec![1.0, 0.0, 0.0, 1.0]));

        let frame = render(
            &config,
            &small_poster(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap();
        assert_close(pixel(&frame, 0.95, 0.3), [255, 0, 0, 255], 1);
    }

    #[test]
    fn translucent_overlay_blends_with_the_backdrop_image() {
        let dir = scratch_assets("translucent_overlay");
        write_png(&dir, "green.png", [0, 255, 0, 255]);

        let mut config = minimal_config();
        config.conferences[0].image = Some("green.png".to_string());
        config.conferences[0].color = Some(ColorSpec::Components(vec![1.0, 0.0, 0.0, 0.5]));

        let frame = render(
            &config,
            &small_poster(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap();
        assert_close(pixel(&frame, 0.95, 0.3), [128, 128, 0, 255], 3);
    }

    #[test]
    fn banner_ignores_panel_images_and_uses_its_own_geometry() {
        let dir = scratch_assets("banner");
        let mut config = minimal_config();
        // Would be MissingAsset if the banner tried to load it.
        config.conferences[0].image = Some("does_not_exist.png".to_string());
        config.conferences[0].color = Some(ColorSpec::Hex("#336699".to_string()));

        let frame = render(
            &config,
            &LayoutParameters::banner(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap();

        assert_eq!((frame.width, frame.height), (851, 315));
        // 90% of #336699 over white, inside the rotated first panel.
        assert_close(pixel(&frame, 0.3, 0.5), [71, 117, 163, 255], 3);
    }

    #[test]
    fn missing_branding_asset_aborts_the_render() {
        let dir = PathBuf::from("target")
            .join("template_tests")
            .join("no_branding");
        std::fs::create_dir_all(&dir).unwrap();

        let err = render(
            &minimal_config(),
            &small_poster(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PlacardError::MissingAsset { .. }));
    }

    #[test]
    fn missing_panel_image_aborts_the_poster_render() {
        let dir = scratch_assets("no_panel_image");
        let mut config = minimal_config();
        config.conferences[1].image = Some("gone.png".to_string());

        let err = render(
            &config,
            &small_poster(),
            &mut AssetStore::new(&dir),
            &mut TextLayoutEngine::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PlacardError::MissingAsset { .. }));
    }
}

use kurbo::Point;

use crate::layout::shape::PanelPathStrategy;

/// Size and anchor of one labeled text element, in normalized units.
///
/// A size of 0 renders nothing; suppressed elements keep a defined entry
/// rather than becoming an error path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextParams {
    /// Font size as a fraction of canvas height.
    pub size: f64,
    /// Anchor position (baseline of the first line).
    pub anchor: Point,
}

/// Anchor and width of one fixed branding image, in normalized units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconParams {
    /// Top-left anchor position.
    pub anchor: Point,
    /// Rendered width as a fraction of canvas width. Height follows the
    /// source image's pixel aspect ratio.
    pub size: f64,
}

/// The per-variant layout table: canvas geometry, feature flags and one entry
/// for every labeled element the template draws.
///
/// Tables are compiled into the two variant constructors below, instantiated
/// once per render and never mutated. Every field is mandatory, so variant
/// override completeness holds by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParameters {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Panel outline geometry.
    pub path_strategy: PanelPathStrategy,

    /// Draw panel backdrop images when a panel provides one.
    pub show_panel_images: bool,
    /// Give the venue line a drop shadow.
    pub place_has_shadow: bool,

    /// Context alpha appended to 3-component panel colors.
    pub panel_alpha: f64,
    /// Width of the white panel perimeter stroke.
    pub panel_stroke_width: f64,
    /// Font size for panel announcement text; 0 suppresses it.
    pub panel_text_size: f64,
    /// Horizontal squeeze applied to constant branding text.
    pub constant_scale_x: f64,

    /// "SmartMonday" headline.
    pub title: TextParams,
    /// Two-line series description.
    pub description: TextParams,
    /// Series URL.
    pub url: TextParams,
    /// Small-print disclaimer.
    pub disclaimer: TextParams,
    /// Venue line (practical info).
    pub place: TextParams,
    /// Date line (practical info).
    pub date: TextParams,

    /// Cercle Informatique logo.
    pub logo_ci: IconParams,
    /// UrLab hackerspace logo.
    pub logo_lab: IconParams,
    /// QR code linking to the series page.
    pub qr: IconParams,
}

impl LayoutParameters {
    /// Print-format poster table (A4 proportions at 2100x2970 by default).
    pub fn poster() -> Self {
        Self {
            width: 2100,
            height: 2970,
            path_strategy: PanelPathStrategy::Pointed,
            show_panel_images: true,
            place_has_shadow: false,
            panel_alpha: 0.5,
            panel_stroke_width: 0.005,
            panel_text_size: 0.08,
            constant_scale_x: 1.0,
            title: TextParams {
                size: 0.1,
                anchor: Point::new(0.02, 0.1),
            },
            description: TextParams {
                size: 0.05,
                anchor: Point::new(0.02, 0.82),
            },
            url: TextParams {
                size: 0.05,
                anchor: Point::new(0.02, 0.97),
            },
            disclaimer: TextParams {
                size: 0.03,
                anchor: Point::new(0.02, 0.935),
            },
            place: TextParams {
                size: 0.05,
                anchor: Point::new(0.02, 0.2),
            },
            date: TextParams {
                size: 0.05,
                anchor: Point::new(0.02, 0.15),
            },
            logo_ci: IconParams {
                anchor: Point::new(0.5, 0.85),
                size: 0.2,
            },
            logo_lab: IconParams {
                anchor: Point::new(0.71, 0.85),
                size: 0.2,
            },
            qr: IconParams {
                anchor: Point::new(0.75, 0.03),
                size: 0.2,
            },
        }
    }

    /// Landscape social-banner table. Panels rotate a quarter turn, backdrop
    /// images and panel text are dropped, and constant text is squeezed to
    /// fit the left column.
    pub fn banner() -> Self {
        Self {
            width: 851,
            height: 315,
            path_strategy: PanelPathStrategy::Rotated,
            show_panel_images: false,
            place_has_shadow: true,
            panel_alpha: 0.9,
            panel_stroke_width: 0.005,
            panel_text_size: 0.0,
            constant_scale_x: 0.4,
            title: TextParams {
                size: 0.18,
                anchor: Point::new(0.02, 0.2),
            },
            description: TextParams {
                size: 0.08,
                anchor: Point::new(0.02, 0.34),
            },
            url: TextParams {
                size: 0.08,
                anchor: Point::new(0.02, 0.95),
            },
            disclaimer: TextParams {
                size: 0.05,
                anchor: Point::new(0.02, 0.86),
            },
            place: TextParams {
                size: 0.08,
                anchor: Point::new(0.02, 0.62),
            },
            date: TextParams {
                size: 0.08,
                anchor: Point::new(0.02, 0.5),
            },
            logo_ci: IconParams {
                anchor: Point::new(0.86, 0.06),
                size: 0.1,
            },
            logo_lab: IconParams {
                anchor: Point::new(0.86, 0.54),
                size: 0.1,
            },
            qr: IconParams {
                anchor: Point::new(0.72, 0.3),
                size: 0.12,
            },
        }
    }

    /// Apply a canvas-size override from the input record.
    pub fn with_canvas(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(w) = width {
            self.width = w;
        }
        if let Some(h) = height {
            self.height = h;
        }
        self
    }
}

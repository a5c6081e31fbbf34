use std::collections::HashMap;

use kurbo::Point;

use crate::config::color::Rgba;
use crate::foundation::error::PlacardResult;
use crate::layout::params::TextParams;
use crate::render::canvas::Canvas;

/// Normalized offset of the drop-shadow pass.
pub const SHADOW_OFFSET: (f64, f64) = (0.002, 0.003);

/// Vertical advance between lines, as a multiple of the font size.
pub const LINE_PITCH: f64 = 0.9;

/// Horizontal stagger between panel text lines, as a multiple of the font
/// size. Global/static text uses zero stagger.
pub const PANEL_STAGGER: f64 = 2.5;

/// Marker brush for parley layouts. The paint color is chosen per draw pass
/// (shadow vs. foreground), so the brush carries no data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrush;

/// Per-block styling on top of the variant's [`TextParams`].
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    /// Foreground fill color.
    pub color: Rgba,
    /// Draw the offset black shadow pass first.
    pub shadow: bool,
    /// Horizontal stagger per line, as a multiple of the font size.
    pub stagger: f64,
}

impl TextStyle {
    /// Unstaggered, unshadowed text in the given color.
    pub fn plain(color: Rgba) -> Self {
        Self {
            color,
            shadow: false,
            stagger: 0.0,
        }
    }
}

/// Stateful helper shaping text through parley's system font collection and
/// drawing the resulting glyph runs onto a [`Canvas`].
///
/// Owned by a single render call, like the canvas itself.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    // vello_cpu carries its own peniko; font blobs are re-wrapped once and
    // cached by (blob id, face index).
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct an engine over the system font collection.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font_cache: HashMap::new(),
        }
    }

    /// Shape a single line of text at `size_px` in the given font family.
    pub fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Lay out and draw a multi-line text block.
    ///
    /// Line breaks in `text` are semantic separators. Each line advances by
    /// [`LINE_PITCH`] font sizes vertically and `style.stagger` font sizes
    /// horizontally. When `style.shadow` is set, a full black pass offset by
    /// [`SHADOW_OFFSET`] precedes the foreground pass. A zero or negative
    /// font size draws nothing.
    pub fn draw_block(
        &mut self,
        canvas: &mut Canvas,
        family: &str,
        text: &str,
        params: &TextParams,
        style: &TextStyle,
    ) -> PlacardResult<()> {
        if params.size <= 0.0 {
            return Ok(());
        }

        let size_px = (params.size * f64::from(canvas.height())) as f32;
        let layouts: Vec<parley::Layout<TextBrush>> = text
            .split('\n')
            .map(|line| self.layout_line(line, family, size_px))
            .collect();

        let line_anchor = |i: usize, offset: (f64, f64)| {
            Point::new(
                params.anchor.x + offset.0 + i as f64 * style.stagger * params.size,
                params.anchor.y + offset.1 + i as f64 * LINE_PITCH * params.size,
            )
        };

        if style.shadow {
            for (i, layout) in layouts.iter().enumerate() {
                self.draw_layout(canvas, layout, line_anchor(i, SHADOW_OFFSET), Rgba::BLACK);
            }
        }
        for (i, layout) in layouts.iter().enumerate() {
            self.draw_layout(canvas, layout, line_anchor(i, (0.0, 0.0)), style.color);
        }
        Ok(())
    }

    /// Draw one shaped line with its first baseline at `anchor`.
    fn draw_layout(
        &mut self,
        canvas: &mut Canvas,
        layout: &parley::Layout<TextBrush>,
        anchor: Point,
        color: Rgba,
    ) {
        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(0.0);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let font = run.run().font();
                let key = (font.data.id(), font.index);
                let font_data = self
                    .font_cache
                    .entry(key)
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font.data.as_ref().to_vec()),
                            font.index,
                        )
                    })
                    .clone();

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                });
                canvas.fill_glyphs(
                    &font_data,
                    run.run().font_size(),
                    anchor,
                    color,
                    glyphs,
                );
            }
        }
    }
}

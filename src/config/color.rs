use serde::{Deserialize, Serialize};

use crate::foundation::error::{PlacardError, PlacardResult};

/// Straight-alpha RGBA color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Build an RGBA value from channel floats.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Quantize to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

/// A panel color as it appears in the input record: either a `#RRGGBB` hex
/// string or an explicit 3/4-float component array.
///
/// The alpha of a 3-component color is context-dependent (it differs between
/// the poster and banner variants), so the input form is kept as-is and only
/// resolved to an [`Rgba`] at render time via [`ColorSpec::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `"#rrggbb"` hex notation.
    Hex(String),
    /// `[r, g, b]` or `[r, g, b, a]`, floats in [0, 1].
    Components(Vec<f64>),
}

impl ColorSpec {
    /// Resolve to a concrete color, appending `default_alpha` when the input
    /// carries only three components (hex colors always do).
    pub fn resolve(&self, default_alpha: f64) -> PlacardResult<Rgba> {
        match self {
            ColorSpec::Hex(s) => {
                let c = parse_hex(s)?;
                Ok(Rgba { a: default_alpha, ..c })
            }
            ColorSpec::Components(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba::rgba(*r, *g, *b, default_alpha)),
                [r, g, b, a] => Ok(Rgba::rgba(*r, *g, *b, *a)),
                _ => Err(PlacardError::validation(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse a strict `#RRGGBB` hex color (exactly 7 characters) into an opaque
/// [`Rgba`]. Anything else is [`PlacardError::InvalidColor`].
pub fn parse_hex(s: &str) -> PlacardResult<Rgba> {
    let invalid = || PlacardError::InvalidColor(s.to_string());

    let digits = s.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let byte = |pair: &str| u8::from_str_radix(pair, 16).map_err(|_| invalid());
    let r = byte(&digits[0..2])?;
    let g = byte(&digits[2..4])?;
    let b = byte(&digits[4..6])?;

    Ok(Rgba::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_rgb() {
        let c = parse_hex("#ff0000").unwrap();
        assert_eq!(c, Rgba::rgba(1.0, 0.0, 0.0, 1.0));

        let c = parse_hex("#336699").unwrap();
        assert!((c.r - 0x33 as f64 / 255.0).abs() < 1e-9);
        assert!((c.g - 0x66 as f64 / 255.0).abs() < 1e-9);
        assert!((c.b - 0x99 as f64 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_anything_but_seven_char_hex() {
        for bad in ["ff0000", "#ff000", "#ff00000", "#00ff0080", "#zzzzzz", "#"] {
            assert!(
                matches!(parse_hex(bad), Err(PlacardError::InvalidColor(_))),
                "expected InvalidColor for {bad:?}"
            );
        }
    }

    #[test]
    fn resolve_appends_context_alpha_to_rgb() {
        let spec: ColorSpec = serde_json::from_str("\"#ff0000\"").unwrap();
        let c = spec.resolve(0.5).unwrap();
        assert_eq!(c, Rgba::rgba(1.0, 0.0, 0.0, 0.5));

        let spec: ColorSpec = serde_json::from_str("[0.2, 0.4, 0.6]").unwrap();
        assert_eq!(spec.resolve(0.9).unwrap(), Rgba::rgba(0.2, 0.4, 0.6, 0.9));

        // An explicit alpha wins over the context default.
        let spec: ColorSpec = serde_json::from_str("[0.2, 0.4, 0.6, 1.0]").unwrap();
        assert_eq!(spec.resolve(0.5).unwrap(), Rgba::rgba(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn resolve_rejects_bad_component_counts() {
        let spec = ColorSpec::Components(vec![0.1, 0.2]);
        assert!(matches!(
            spec.resolve(0.5),
            Err(PlacardError::Validation(_))
        ));
    }

    #[test]
    fn rgba8_quantization_rounds() {
        assert_eq!(Rgba::rgba(1.0, 0.0, 0.5, 0.5).to_rgba8(), [255, 0, 128, 128]);
    }
}

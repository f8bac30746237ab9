//! Hex color codec and blending.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("cannot mix an empty color list")]
    Empty,
}

/// An RGB triple. Channels are `f64` so weighted blends can extrapolate
/// outside `0..=255` before re-encoding saturates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(f64::from)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };
    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Encode as `#RRGGBB`, uppercase. Channels are rounded to nearest and
/// saturated into `0..=255`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    let clamp = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    format!("#{:02X}{:02X}{:02X}", clamp(rgb.r), clamp(rgb.g), clamp(rgb.b))
}

/// Component-wise arithmetic mean of any number of colors.
///
/// Order-independent; a single-element list is the identity. An empty
/// list is a caller error, not a color.
pub fn color_mix<S: AsRef<str>>(colors: &[S]) -> Result<String, ColorError> {
    if colors.is_empty() {
        return Err(ColorError::Empty);
    }
    let mut total = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    for color in colors {
        let rgb = hex_to_rgb(color.as_ref())?;
        total.r += rgb.r;
        total.g += rgb.g;
        total.b += rgb.b;
    }
    let n = colors.len() as f64;
    Ok(rgb_to_hex(Rgb {
        r: total.r / n,
        g: total.g / n,
        b: total.b / n,
    }))
}

/// Weighted two-color blend: `a * ratio + b * (1 - ratio)` per channel.
///
/// A ratio outside `[0, 1]` extrapolates rather than erroring; only the
/// final hex encoding saturates channels.
pub fn average_color(a: &str, b: &str, ratio: f64) -> Result<String, ColorError> {
    let rgb_a = hex_to_rgb(a)?;
    let rgb_b = hex_to_rgb(b)?;
    Ok(rgb_to_hex(Rgb {
        r: rgb_a.r * ratio + rgb_b.r * (1.0 - ratio),
        g: rgb_a.g * ratio + rgb_b.g * (1.0 - ratio),
        b: rgb_a.b * ratio + rgb_b.b * (1.0 - ratio),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_variants() {
        assert_eq!(
            hex_to_rgb("#FF8000").unwrap(),
            Rgb {
                r: 255.0,
                g: 128.0,
                b: 0.0
            }
        );
        assert_eq!(hex_to_rgb("ff8000").unwrap(), hex_to_rgb("#FF8000").unwrap());
    }

    #[test]
    fn hex_parse_rejects_garbage() {
        assert!(matches!(hex_to_rgb("#FF80"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(hex_to_rgb("#GGGGGG"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(hex_to_rgb(""), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn hex_encode_uppercase_with_hash() {
        assert_eq!(
            rgb_to_hex(Rgb {
                r: 255.0,
                g: 128.0,
                b: 0.0
            }),
            "#FF8000"
        );
    }

    #[test]
    fn mix_single_is_identity() {
        assert_eq!(color_mix(&["#3C6E9F"]).unwrap(), "#3C6E9F");
    }

    #[test]
    fn mix_pair_is_commutative() {
        let ab = color_mix(&["#102030", "#405060"]).unwrap();
        let ba = color_mix(&["#405060", "#102030"]).unwrap();
        assert_eq!(ab, ba);
        // (0x10+0x40)/2, (0x20+0x50)/2, (0x30+0x60)/2
        assert_eq!(ab, "#283848");
    }

    #[test]
    fn mix_empty_is_an_error() {
        let colors: [&str; 0] = [];
        assert!(matches!(color_mix(&colors), Err(ColorError::Empty)));
    }

    #[test]
    fn mix_rounds_to_nearest() {
        // (0 + 255) / 2 = 127.5 → 128
        assert_eq!(color_mix(&["#000000", "#FFFFFF"]).unwrap(), "#808080");
    }

    #[test]
    fn average_same_color_is_fixed_point() {
        for ratio in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(average_color("#12AB34", "#12AB34", ratio).unwrap(), "#12AB34");
        }
    }

    #[test]
    fn average_ratio_endpoints() {
        assert_eq!(average_color("#FF0000", "#0000FF", 1.0).unwrap(), "#FF0000");
        assert_eq!(average_color("#FF0000", "#0000FF", 0.0).unwrap(), "#0000FF");
    }

    #[test]
    fn average_ratio_extrapolates_and_saturates() {
        // ratio 2.0 pushes red to 510 and blue to -255; encoding saturates.
        assert_eq!(average_color("#FF0000", "#0000FF", 2.0).unwrap(), "#FF0000");
    }
}

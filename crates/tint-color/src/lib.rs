#![forbid(unsafe_code)]

//! Color primitives for tint.
//!
//! # Role in tint
//! `tint-color` is the shared color vocabulary. Scheme generation, token
//! derivation and the palette store all exchange [`Rgb`] values and reach for
//! [`Hsl`] whenever they need to reason about hue, saturation or lightness.
//!
//! # This crate provides
//! - [`Rgb`] with strict `#rrggbb` parsing and lowercase formatting.
//! - [`Hsl`] with lossless-as-possible conversion to and from [`Rgb`].
//! - `From` conversions between [`Rgb`] and `palette::Srgb<u8>`, which
//!   also backs hex decoding and the HSL math.
//! - WCAG relative luminance and contrast-ratio helpers.
//!
//! Everything here is pure and allocation-free except hex formatting.

/// WCAG luminance and contrast utilities.
pub mod contrast;
/// HSL representation and adjustments.
pub mod hsl;
/// 8-bit RGB values and hex parsing.
pub mod rgb;

pub use contrast::{
    WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_LARGE_TEXT, WCAG_AAA_NORMAL_TEXT,
    best_text_color, contrast_ratio, meets_wcag_aa, meets_wcag_aa_large_text, meets_wcag_aaa,
    relative_luminance,
};
pub use hsl::Hsl;
pub use rgb::{ColorParseError, Rgb};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_through_hsl_keeps_primaries() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000"] {
            let rgb: Rgb = hex.parse().unwrap();
            assert_eq!(Rgb::from(rgb.to_hsl()).to_string(), hex);
        }
    }

    #[test]
    fn white_on_black_is_max_contrast() {
        let ratio = contrast_ratio(Rgb::WHITE, Rgb::BLACK);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert!(meets_wcag_aaa(Rgb::WHITE, Rgb::BLACK));
    }

    #[test]
    fn best_text_color_prefers_higher_ratio() {
        let bg: Rgb = "#fafafa".parse().unwrap();
        assert_eq!(best_text_color(bg, &[Rgb::WHITE, Rgb::BLACK]), Rgb::BLACK);
    }
}

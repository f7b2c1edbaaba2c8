#![forbid(unsafe_code)]

//! Light to dark variant mapping.
//!
//! Inverting lightness does not guarantee legibility on a dark surface, so
//! the mapping is asymmetric: colors that read as light are pushed down into
//! `[36, 52]`, colors that are already mid or dark are lifted into `[55, 72]`.
//! Saturation drops by roughly 12% and is held inside `[30, 88]` unless the
//! input is achromatic, in which case it stays grey. Hue never changes.

use tint_color::{Hsl, Rgb};

/// Inputs lighter than this (HSL lightness, percent) read as light.
pub const LIGHT_THRESHOLD: f64 = 55.0;

/// Target lightness band for inputs above [`LIGHT_THRESHOLD`].
pub const DARKENED_BAND: (f64, f64) = (36.0, 52.0);

/// Target lightness band for inputs at or below [`LIGHT_THRESHOLD`].
pub const LIFTED_BAND: (f64, f64) = (55.0, 72.0);

const SATURATION_BAND: (f64, f64) = (30.0, 88.0);

/// Derive the dark-mode counterpart of a light-mode color.
#[must_use]
pub fn derive_dark_variant(light: Rgb) -> Rgb {
    dark_hsl(light.to_hsl()).to_rgb()
}

/// HSL form of [`derive_dark_variant`], before 8-bit quantization.
#[must_use]
pub fn dark_hsl(Hsl { h, s, l }: Hsl) -> Hsl {
    let new_l = if l > LIGHT_THRESHOLD {
        (38.0 + (100.0 - l) * 0.28).clamp(DARKENED_BAND.0, DARKENED_BAND.1)
    } else {
        (58.0 + l * 0.25).clamp(LIFTED_BAND.0, LIFTED_BAND.1)
    };
    let new_s = if s <= f64::EPSILON {
        0.0
    } else {
        (s * 0.88).clamp(SATURATION_BAND.0, SATURATION_BAND.1)
    };
    Hsl::new(h, new_s, new_l)
}

#![forbid(unsafe_code)]

//! HSL colors.
//!
//! Hue is in degrees `[0, 360)`, saturation and lightness are percentages
//! `[0, 100]`. Every constructor normalizes into those ranges, so arithmetic
//! at call sites can overshoot freely and rely on [`Hsl::new`] to wrap the
//! hue and clamp the rest.
//!
//! Conversion to and from RGB goes through `palette`; this type only fixes
//! the units the harmony tables are written in.

use palette::{FromColor, Srgb};

use crate::rgb::Rgb;

type SrgbHsl = palette::Hsl<palette::encoding::Srgb, f64>;

/// A color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation percentage, `[0, 100]`.
    pub s: f64,
    /// Lightness percentage, `[0, 100]`.
    pub l: f64,
}

impl Hsl {
    /// Create a normalized HSL color.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self::new(h, self.s, self.l)
    }

    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Rotate the hue by `degrees` (negative values rotate backwards).
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        self.with_hue(self.h + degrees)
    }

    /// Whether the color carries no hue information.
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.s <= f64::EPSILON
    }

    /// Convert to 8-bit RGB, rounding each channel to the nearest value.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let hsl = SrgbHsl::new(self.h, self.s / 100.0, self.l / 100.0);
        let rgb: Srgb<u8> = Srgb::<f64>::from_color(hsl).into_format();
        rgb.into()
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let unit: Srgb<f64> = Srgb::<u8>::from(rgb).into_format();
        let hsl = SrgbHsl::from_color(unit);
        Self::new(
            hsl.hue.into_positive_degrees(),
            hsl.saturation * 100.0,
            hsl.lightness * 100.0,
        )
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs due to rounding.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

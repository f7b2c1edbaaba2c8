#![forbid(unsafe_code)]

//! 8-bit RGB colors and `#rrggbb` parsing.
//!
//! Parsing is the only fallible way to obtain an [`Rgb`] from outside the
//! crate. Accepted inputs are `#rrggbb`, `rrggbb`, `#rgb` and `rgb` in any
//! letter case, with surrounding whitespace ignored. Formatting always yields
//! the normalized lowercase `#rrggbb` form.
//!
//! [`Rgb`] converts losslessly to and from `palette::Srgb<u8>`, which is
//! where the crate hands off for color-space work.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::hsl::Hsl;

/// An opaque sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse a hex color string.
    ///
    /// The characters are checked here so that errors can name the
    /// offending digit; decoding itself is `palette`'s hex parser.
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(ch) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit {
                input: input.to_string(),
                ch,
            });
        }
        let invalid_length = || ColorParseError::InvalidLength {
            input: input.to_string(),
            len: digits.len(),
        };
        if !matches!(digits.len(), 3 | 6) {
            return Err(invalid_length());
        }
        digits
            .parse::<Srgb<u8>>()
            .map(Self::from)
            .map_err(|_| invalid_length())
    }

    /// Whether `input` parses as a hex color.
    #[must_use]
    pub fn is_valid_hex(input: &str) -> bool {
        Self::parse_hex(input).is_ok()
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Decompose into HSL.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        Hsl::from(self)
    }

    /// WCAG relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        crate::contrast::relative_luminance(self)
    }

    /// WCAG contrast ratio against `other`, in `[1, 21]`.
    #[must_use]
    pub fn contrast_ratio(self, other: Self) -> f64 {
        crate::contrast::contrast_ratio(self, other)
    }

    /// Raise HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        hsl.with_lightness(hsl.l + amount).into()
    }

    /// Lower HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.lighten(-amount)
    }

    /// Lower HSL saturation by `amount` percentage points.
    #[must_use]
    pub fn desaturate(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        hsl.with_saturation(hsl.s - amount).into()
    }

    /// Rotate the hue by `degrees`, wrapping around the color wheel.
    #[must_use]
    pub fn rotate_hue(self, degrees: f64) -> Self {
        self.to_hsl().rotate(degrees).into()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(rgb: Srgb<u8>) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(rgb: Rgb) -> Self {
        Srgb::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Nothing but whitespace (and possibly `#`).
    Empty,
    /// Digit count other than 3 or 6.
    InvalidLength { input: String, len: usize },
    /// A character outside `[0-9a-fA-F]`.
    InvalidDigit { input: String, ch: char },
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color string"),
            Self::InvalidLength { input, len } => {
                write!(f, "invalid hex color {input:?}: expected 3 or 6 digits, got {len}")
            }
            Self::InvalidDigit { input, ch } => {
                write!(f, "invalid hex color {input:?}: unexpected character {ch:?}")
            }
        }
    }
}

impl std::error::Error for ColorParseError {}

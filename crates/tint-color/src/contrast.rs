#![forbid(unsafe_code)]

//! WCAG 2.x relative luminance and contrast ratio.

use crate::rgb::Rgb;

/// Minimum contrast for normal-size text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum contrast for normal-size text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum contrast for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an sRGB color, `0.0` for black and `1.0` for white.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors. Symmetric, in `[1, 21]`.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

#[must_use]
pub fn meets_wcag_aa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_NORMAL_TEXT
}

#[must_use]
pub fn meets_wcag_aa_large_text(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_LARGE_TEXT
}

#[must_use]
pub fn meets_wcag_aaa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AAA_NORMAL_TEXT
}

/// Pick the candidate with the highest contrast against `bg`.
///
/// Ties keep the earlier candidate. With no candidates, falls back to
/// whichever of black or white contrasts more.
#[must_use]
pub fn best_text_color(bg: Rgb, candidates: &[Rgb]) -> Rgb {
    let mut best: Option<(Rgb, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(candidate, bg);
        if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
            best = Some((candidate, ratio));
        }
    }
    match best {
        Some((color, _)) => color,
        None if contrast_ratio(Rgb::BLACK, bg) >= contrast_ratio(Rgb::WHITE, bg) => Rgb::BLACK,
        None => Rgb::WHITE,
    }
}

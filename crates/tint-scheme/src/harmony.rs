#![forbid(unsafe_code)]

//! Harmony generators: base color to six light-mode role colors.
//!
//! Every generator reads the base as HSL `(H, S, L)` and emits one color per
//! [`Role`](crate::Role) in priority order. Derived saturations and
//! lightnesses are scaled and then clamped into per-role bands so that the
//! output stays usable for UI work whatever the base looks like: no role
//! collapses to grey and no role turns neon.

use tint_color::{Hsl, Rgb};

use crate::role::Role;
use crate::strategy::Strategy;

/// Light-mode colors for all six roles, indexed by [`Role::index`].
pub type RoleColors = [Rgb; Role::COUNT];

/// Generate the six role colors for `strategy` around `base`.
#[must_use]
pub fn generate(strategy: Strategy, base: Rgb) -> RoleColors {
    let hsl = base.to_hsl();
    match strategy {
        Strategy::Monochromatic => monochromatic(hsl),
        Strategy::Analogous => analogous(base, hsl),
        Strategy::Complementary => complementary(base, hsl),
        Strategy::Triadic => triadic(base, hsl),
        Strategy::SplitComplementary => split_complementary(base, hsl),
        Strategy::Tetradic => tetradic(base, hsl),
    }
}

fn tone(h: f64, s: f64, l: f64) -> Rgb {
    Hsl::new(h, s, l).to_rgb()
}

/// `value * factor`, clamped into `[lo, hi]`.
fn band(value: f64, factor: f64, lo: f64, hi: f64) -> f64 {
    (value * factor).clamp(lo, hi)
}

fn monochromatic(Hsl { h, s, .. }: Hsl) -> RoleColors {
    [
        tone(h, s, 50.0),
        tone(h, band(s, 0.55, 20.0, 45.0), 62.0),
        tone(h, band(s, 1.05, 60.0, 90.0), 52.0),
        tone(h, band(s, 0.2, 8.0, 20.0), 72.0),
        tone(h, s, 48.0),
        tone(h, band(s, 0.75, 35.0, 65.0), 42.0),
    ]
}

fn analogous(base: Rgb, Hsl { h, s, l }: Hsl) -> RoleColors {
    [
        base,
        tone(h + 30.0, band(s, 0.85, 40.0, 75.0), l.clamp(42.0, 62.0)),
        tone(h - 30.0, band(s, 1.05, 55.0, 88.0), l.clamp(42.0, 60.0)),
        tone(h, band(s, 0.2, 8.0, 18.0), 70.0),
        base,
        tone(h + 15.0, band(s, 0.9, 40.0, 70.0), band(l, 0.88, 35.0, 55.0)),
    ]
}

fn complementary(base: Rgb, Hsl { h, s, l }: Hsl) -> RoleColors {
    let complement = h + 180.0;
    [
        base,
        tone(h, band(s, 0.55, 20.0, 45.0), (l + 10.0).clamp(50.0, 68.0)),
        tone(complement, band(s, 0.95, 50.0, 85.0), l.clamp(42.0, 60.0)),
        tone(h, band(s, 0.15, 6.0, 16.0), 72.0),
        base,
        tone(complement, band(s, 0.65, 30.0, 60.0), (l + 8.0).clamp(48.0, 65.0)),
    ]
}

fn triadic(base: Rgb, Hsl { h, s, l }: Hsl) -> RoleColors {
    [
        base,
        tone(h + 120.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h + 240.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h, band(s, 0.2, 8.0, 18.0), 72.0),
        base,
        tone(h + 60.0, band(s, 0.75, 35.0, 65.0), band(l, 0.9, 36.0, 56.0)),
    ]
}

fn split_complementary(base: Rgb, Hsl { h, s, l }: Hsl) -> RoleColors {
    [
        base,
        tone(h + 210.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h + 150.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h, band(s, 0.18, 6.0, 16.0), 72.0),
        base,
        tone(h + 180.0, band(s, 0.6, 28.0, 55.0), (l + 10.0).clamp(50.0, 68.0)),
    ]
}

fn tetradic(base: Rgb, Hsl { h, s, l }: Hsl) -> RoleColors {
    [
        base,
        tone(h + 90.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h + 180.0, band(s, 0.9, 45.0, 80.0), l.clamp(42.0, 60.0)),
        tone(h, band(s, 0.2, 8.0, 18.0), 72.0),
        base,
        tone(h + 270.0, band(s, 0.85, 40.0, 75.0), l.clamp(42.0, 60.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Rgb = Rgb::from_u32(0x3366cc);

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn base_passes_through_as_primary_and_ring() {
        for strategy in Strategy::ALL {
            if strategy == Strategy::Monochromatic {
                continue;
            }
            let colors = generate(strategy, BASE);
            assert_eq!(colors[Role::Primary.index()], BASE, "{strategy}");
            assert_eq!(colors[Role::Ring.index()], BASE, "{strategy}");
        }
    }

    #[test]
    fn monochromatic_keeps_one_hue() {
        let base_hue = BASE.to_hsl().h;
        let colors = generate(Strategy::Monochromatic, BASE);
        for color in colors {
            let hsl = color.to_hsl();
            assert!(hue_distance(hsl.h, base_hue) < 4.0, "{color} drifted to {}", hsl.h);
        }
        assert!((colors[Role::Primary.index()].to_hsl().l - 50.0).abs() < 0.5);
        assert!((colors[Role::Ring.index()].to_hsl().l - 48.0).abs() < 0.5);
    }

    #[test]
    fn complementary_accent_sits_opposite() {
        let base_hue = BASE.to_hsl().h;
        let accent = generate(Strategy::Complementary, BASE)[Role::Accent.index()].to_hsl();
        assert!(hue_distance(accent.h, base_hue + 180.0) < 2.0);
    }

    #[test]
    fn triadic_hues_are_evenly_spaced() {
        let base_hue = BASE.to_hsl().h;
        let colors = generate(Strategy::Triadic, BASE);
        let secondary = colors[Role::Secondary.index()].to_hsl().h;
        let accent = colors[Role::Accent.index()].to_hsl().h;
        assert!(hue_distance(secondary, base_hue + 120.0) < 2.0);
        assert!(hue_distance(accent, base_hue + 240.0) < 2.0);
    }

    #[test]
    fn muted_saturation_stays_in_band_for_vivid_base() {
        let vivid = Rgb::from_u32(0xff0000);
        for strategy in Strategy::ALL {
            let muted = generate(strategy, vivid)[Role::Muted.index()].to_hsl();
            assert!(muted.s <= 21.5, "{strategy}: muted s = {}", muted.s);
            assert!(muted.l >= 69.5, "{strategy}: muted l = {}", muted.l);
        }
    }

    #[test]
    fn grey_base_still_yields_colorful_accents() {
        let grey = Rgb::from_u32(0x808080);
        let accent = generate(Strategy::Tetradic, grey)[Role::Accent.index()].to_hsl();
        assert!(accent.s >= 44.0, "accent s = {}", accent.s);
    }
}

#![forbid(unsafe_code)]

//! Scheme assembly: harmony + dark variants + strategy metadata.

use tint_color::{Hsl, Rgb};

use crate::harmony;
use crate::role::Role;
use crate::strategy::{Strategy, StrategyInfo};
use crate::variant::derive_dark_variant;

/// Source of uniform randomness for base-color synthesis.
///
/// Implemented for every [`rand::RngCore`], so a seeded
/// `SmallRng` makes generation reproducible in tests.
pub trait RandomSource {
    /// A uniform sample from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform sample from the closed range `[lo, hi]`.
    ///
    /// The default scales [`next_unit`](Self::next_unit), so a source that
    /// only provides unit samples approaches `hi` without reaching it.
    fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

impl<R: rand::RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }

    fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        rand::Rng::random_range(self, lo..=hi)
    }
}

/// Light and dark values for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleVariant {
    pub light: Rgb,
    pub dark: Rgb,
}

impl RoleVariant {
    /// Pair `light` with its derived dark counterpart.
    #[must_use]
    pub fn from_light(light: Rgb) -> Self {
        Self {
            light,
            dark: derive_dark_variant(light),
        }
    }
}

/// One full generation pass: six roles plus descriptive metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scheme {
    pub strategy: Strategy,
    pub base: Rgb,
    pub info: &'static StrategyInfo,
    colors: [RoleVariant; Role::COUNT],
}

impl Scheme {
    /// Colors for `role`.
    #[must_use]
    pub fn color(&self, role: Role) -> RoleVariant {
        self.colors[role.index()]
    }

    /// `(role, colors)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, RoleVariant)> + '_ {
        Role::ALL.into_iter().zip(self.colors.iter().copied())
    }

    /// The first `count` roles, as used by a palette of that size.
    pub fn take(&self, count: usize) -> impl Iterator<Item = (Role, RoleVariant)> + '_ {
        self.iter().take(count)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.info.description
    }

    #[must_use]
    pub fn mood(&self) -> &'static str {
        self.info.mood
    }

    #[must_use]
    pub fn use_cases(&self) -> &'static [&'static str] {
        self.info.use_cases
    }

    #[must_use]
    pub fn tags(&self) -> &'static [&'static str] {
        self.info.tags
    }
}

/// Hue range for synthesized bases.
pub const BASE_HUE: (f64, f64) = (0.0, 360.0);
/// Saturation range for synthesized bases.
pub const BASE_SATURATION: (f64, f64) = (55.0, 80.0);
/// Lightness range for synthesized bases.
pub const BASE_LIGHTNESS: (f64, f64) = (40.0, 60.0);

/// Draw a UI-friendly base color: saturated enough to avoid greys, not so
/// saturated it turns neon, with lightness headroom for both variants.
pub fn synthesize_base<R: RandomSource + ?Sized>(rng: &mut R) -> Rgb {
    let h = rng.next_in(BASE_HUE.0, BASE_HUE.1);
    let s = rng.next_in(BASE_SATURATION.0, BASE_SATURATION.1);
    let l = rng.next_in(BASE_LIGHTNESS.0, BASE_LIGHTNESS.1);
    Hsl::new(h, s, l).to_rgb()
}

/// Generate a scheme, synthesizing a base from `rng` when none is given.
pub fn generate_scheme<R: RandomSource + ?Sized>(
    strategy: Strategy,
    base: Option<Rgb>,
    rng: &mut R,
) -> Scheme {
    let base = match base {
        Some(base) => base,
        None => synthesize_base(rng),
    };
    generate_scheme_from(strategy, base)
}

/// Generate a scheme around an explicit base. Pure.
#[must_use]
pub fn generate_scheme_from(strategy: Strategy, base: Rgb) -> Scheme {
    let _span =
        tracing::debug_span!("scheme.generate", strategy = %strategy, base = %base).entered();
    let lights = harmony::generate(strategy, base);
    let colors = lights.map(RoleVariant::from_light);
    tracing::debug!(primary = %colors[0].light, "scheme generated");
    Scheme {
        strategy,
        base,
        info: strategy.info(),
        colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Replays a fixed sequence of unit samples.
    struct Fixed(Vec<f64>, usize);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    #[test]
    fn explicit_base_is_deterministic() {
        let base = Rgb::from_u32(0x3366cc);
        for strategy in Strategy::ALL {
            assert_eq!(
                generate_scheme_from(strategy, base),
                generate_scheme_from(strategy, base)
            );
        }
    }

    #[test]
    fn explicit_base_ignores_rng() {
        let base = Rgb::from_u32(0x3366cc);
        let mut a = SmallRng::seed_from_u64(1);
        let mut b = SmallRng::seed_from_u64(2);
        assert_eq!(
            generate_scheme(Strategy::Triadic, Some(base), &mut a),
            generate_scheme(Strategy::Triadic, Some(base), &mut b)
        );
    }

    #[test]
    fn synthesized_base_uses_range_endpoints() {
        let low = synthesize_base(&mut Fixed(vec![0.0], 0)).to_hsl();
        assert!((low.s - 55.0).abs() < 1.0, "s = {}", low.s);
        assert!((low.l - 40.0).abs() < 0.5, "l = {}", low.l);

        let high = synthesize_base(&mut Fixed(vec![0.5, 0.999_999, 0.999_999], 0)).to_hsl();
        assert!((high.h - 180.0).abs() < 1.0, "h = {}", high.h);
        assert!((high.s - 80.0).abs() < 1.0, "s = {}", high.s);
        assert!((high.l - 60.0).abs() < 0.5, "l = {}", high.l);
    }

    #[test]
    fn rng_samples_stay_in_closed_ranges() {
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(rng.next_in(55.0, 55.0), 55.0);
        for _ in 0..1_000 {
            let s = rng.next_in(BASE_SATURATION.0, BASE_SATURATION.1);
            let l = rng.next_in(BASE_LIGHTNESS.0, BASE_LIGHTNESS.1);
            assert!((55.0..=80.0).contains(&s), "s = {s}");
            assert!((40.0..=60.0).contains(&l), "l = {l}");
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(
            generate_scheme(Strategy::Analogous, None, &mut a),
            generate_scheme(Strategy::Analogous, None, &mut b)
        );
    }

    #[test]
    fn scheme_carries_metadata_and_dark_pairs() {
        let scheme = generate_scheme_from(Strategy::Complementary, Rgb::from_u32(0x3366cc));
        assert_eq!(scheme.name(), "Complementary Contrast");
        assert_eq!(scheme.iter().count(), Role::COUNT);
        for (_, variant) in scheme.iter() {
            assert_eq!(variant.dark, derive_dark_variant(variant.light));
        }
        let roles: Vec<Role> = scheme.take(3).map(|(role, _)| role).collect();
        assert_eq!(roles, vec![Role::Primary, Role::Secondary, Role::Accent]);
    }
}

#![forbid(unsafe_code)]

//! Color-harmony schemes and theme tokens for tint.
//!
//! # Role in tint
//! `tint-scheme` turns a strategy and a base color into a six-role scheme
//! with light and dark variants, and expands any subset of those roles into
//! a contrast-checked set of UI tokens. It holds no state; `tint-state`
//! builds the palette state machine on top of it.
//!
//! # This crate provides
//! - [`Role`] and [`Strategy`] with static [`StrategyInfo`] metadata.
//! - [`harmony::generate`] for the per-strategy role table.
//! - [`derive_dark_variant`] for the light to dark mapping.
//! - [`generate_scheme`] with an injectable [`RandomSource`].
//! - [`derive_tokens`] and [`compute_foreground`] for theme tokens.
//!
//! ```
//! use tint_color::Rgb;
//! use tint_scheme::{Mode, Role, Strategy, derive_tokens, generate_scheme_from};
//!
//! let scheme = generate_scheme_from(Strategy::Triadic, Rgb::from_u32(0x3366cc));
//! let active: Vec<(Role, Rgb)> = scheme.take(3).map(|(role, c)| (role, c.light)).collect();
//! let tokens = derive_tokens(&active, active[0].1, Mode::Light);
//! assert!(tokens.contains("muted-foreground"));
//! ```

/// Per-strategy harmony generators.
pub mod harmony;
/// Semantic color roles.
pub mod role;
/// Scheme assembly and base synthesis.
pub mod scheme;
/// Strategies and their metadata.
pub mod strategy;
/// Theme token derivation.
pub mod tokens;
/// Light to dark variant mapping.
pub mod variant;

pub use harmony::RoleColors;
pub use role::Role;
pub use scheme::{
    BASE_HUE, BASE_LIGHTNESS, BASE_SATURATION, RandomSource, RoleVariant, Scheme,
    generate_scheme, generate_scheme_from, synthesize_base,
};
pub use strategy::{Strategy, StrategyInfo, StrategyParseError};
pub use tokens::{
    FOREGROUND_NEAR_BLACK, FOREGROUND_WHITE, Mode, TEXT_ON_DARK, TEXT_ON_LIGHT, ThemeTokens,
    compute_foreground, derive_tokens,
};
pub use variant::{DARKENED_BAND, LIFTED_BAND, LIGHT_THRESHOLD, derive_dark_variant};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use tint_color::{Rgb, WCAG_AA_NORMAL_TEXT, contrast_ratio};

    #[test]
    fn foreground_meets_aa_for_most_colors() {
        let mut rng = SmallRng::seed_from_u64(0x7157);
        let samples = 10_000;
        let passing = (0..samples)
            .filter(|_| {
                let bg = Rgb::from_u32(rand::Rng::random::<u32>(&mut rng) & 0x00ff_ffff);
                contrast_ratio(compute_foreground(bg), bg) >= WCAG_AA_NORMAL_TEXT
            })
            .count();
        assert!(
            passing * 100 >= samples * 95,
            "only {passing}/{samples} met AA"
        );
    }

    #[test]
    fn every_role_foreground_in_a_full_palette_is_readable_or_best_effort() {
        let mut rng = SmallRng::seed_from_u64(7);
        for strategy in Strategy::ALL {
            let scheme = generate_scheme(strategy, None, &mut rng);
            for mode in [Mode::Light, Mode::Dark] {
                let active: Vec<(Role, Rgb)> = scheme
                    .iter()
                    .map(|(role, c)| (role, if mode.is_dark() { c.dark } else { c.light }))
                    .collect();
                let tokens = derive_tokens(&active, active[0].1, mode);
                for role in Role::ALL {
                    let bg = tokens.get(role.name()).unwrap();
                    let fg = tokens.get(role.foreground_token()).unwrap();
                    let white = contrast_ratio(FOREGROUND_WHITE, bg);
                    let black = contrast_ratio(FOREGROUND_NEAR_BLACK, bg);
                    assert!(contrast_ratio(fg, bg) >= white.max(black).min(WCAG_AA_NORMAL_TEXT));
                }
            }
        }
    }
}

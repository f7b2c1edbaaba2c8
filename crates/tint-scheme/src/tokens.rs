#![forbid(unsafe_code)]

//! Theme token derivation.
//!
//! Expands a palette's active role colors into the full set of structural
//! UI tokens for one mode. Derivation runs in four steps:
//!
//! 1. Structural surfaces (background, card, border, ...) tinted from the
//!    primary hue, with fixed text colors.
//! 2. Each active role writes `{role}` and a contrast-picked
//!    `{role}-foreground`, replacing any structural default of that name.
//! 3. `chart-1..chart-5` cycle through the active colors.
//! 4. `ring` falls back to the primary color.
//!
//! Roles missing from a small palette keep their step-1 values, so
//! `secondary`, `muted` and `accent` always resolve.

use std::fmt;

use tint_color::{Hsl, Rgb, best_text_color, meets_wcag_aa};

use crate::role::Role;

/// Display mode a token set is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Mode::Dark)
    }

    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Mode::Dark } else { Mode::Light }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Light foreground candidate.
pub const FOREGROUND_WHITE: Rgb = Rgb::WHITE;
/// Dark foreground candidate.
pub const FOREGROUND_NEAR_BLACK: Rgb = Rgb::from_u32(0x09090b);
/// Body text on dark backgrounds.
pub const TEXT_ON_DARK: Rgb = Rgb::from_u32(0xfafafa);
/// Body text on light backgrounds.
pub const TEXT_ON_LIGHT: Rgb = FOREGROUND_NEAR_BLACK;

const DESTRUCTIVE_LIGHT: Rgb = Rgb::from_u32(0xef4444);
const DESTRUCTIVE_DARK: Rgb = Rgb::from_u32(0x7f1d1d);

const CHART_TOKENS: [&str; 5] = ["chart-1", "chart-2", "chart-3", "chart-4", "chart-5"];

/// Pick a readable text color for `bg`.
///
/// White wins if it reaches WCAG AA. Otherwise the higher-contrast of white
/// and near-black is returned, with ties going to white. Never fails.
#[must_use]
pub fn compute_foreground(bg: Rgb) -> Rgb {
    if meets_wcag_aa(FOREGROUND_WHITE, bg) {
        return FOREGROUND_WHITE;
    }
    best_text_color(bg, &[FOREGROUND_WHITE, FOREGROUND_NEAR_BLACK])
}

/// Ordered token name to color mapping.
///
/// Names are unique; re-setting a name replaces its value in place so the
/// original insertion order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeTokens {
    entries: Vec<(&'static str, Rgb)>,
}

impl ThemeTokens {
    fn set(&mut self, name: &'static str, color: Rgb) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((name, color)),
        }
    }

    /// Set `name` and its `-foreground` pair.
    fn set_pair(&mut self, name: &'static str, foreground: &'static str, color: Rgb) {
        self.set(name, color);
        self.set(foreground, compute_foreground(color));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, color)| color)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Rgb)> + '_ {
        self.entries.iter().copied()
    }

    /// Render as CSS custom-property declarations, one per line:
    /// `--background: #fafcff;`
    #[must_use]
    pub fn css_declarations(&self) -> String {
        let mut out = String::new();
        for (name, color) in self.iter() {
            out.push_str("--");
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&color.to_hex());
            out.push_str(";\n");
        }
        out
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThemeTokens {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, color) in &self.entries {
            map.serialize_entry(name, color)?;
        }
        map.end()
    }
}

/// Derive the full token set for `mode`.
///
/// `active` lists the palette's role colors for that mode in priority order;
/// `primary` tints the structural surfaces.
#[must_use]
pub fn derive_tokens(active: &[(Role, Rgb)], primary: Rgb, mode: Mode) -> ThemeTokens {
    let _span = tracing::debug_span!(
        "tokens.derive",
        mode = %mode,
        active = active.len(),
        primary = %primary
    )
    .entered();

    let mut tokens = structural_tokens(primary, mode);

    for &(role, color) in active {
        tokens.set_pair(role.name(), role.foreground_token(), color);
    }

    for (idx, name) in CHART_TOKENS.into_iter().enumerate() {
        let color = if active.is_empty() {
            primary
        } else {
            active[idx % active.len()].1
        };
        tokens.set(name, color);
    }

    if !tokens.contains(Role::Ring.name()) {
        tokens.set(Role::Ring.name(), primary);
    }

    tracing::debug!(tokens = tokens.len(), "tokens derived");
    tokens
}

fn structural_tokens(primary: Rgb, mode: Mode) -> ThemeTokens {
    let Hsl { h, s, .. } = primary.to_hsl();
    let tint = |sat: f64, l: f64| Hsl::new(h, sat, l).to_rgb();

    let (background, card, border, secondary, muted, accent, foreground, destructive) =
        match mode {
            Mode::Dark => {
                let surface_s = (s * 0.3).min(15.0);
                let secondary = tint(surface_s, 15.0);
                (
                    tint(surface_s, 5.0),
                    tint(surface_s, 12.0),
                    tint(surface_s, 18.0),
                    secondary,
                    secondary,
                    tint((s * 0.5).min(25.0), 20.0),
                    TEXT_ON_DARK,
                    DESTRUCTIVE_DARK,
                )
            }
            Mode::Light => {
                let wash = tint((s * 0.2).min(12.0), 94.0);
                (
                    tint((s * 0.2).min(8.0), 98.0),
                    Rgb::WHITE,
                    tint((s * 0.2).min(10.0), 90.0),
                    wash,
                    tint((s * 0.1).min(8.0), 94.0),
                    wash,
                    TEXT_ON_LIGHT,
                    DESTRUCTIVE_LIGHT,
                )
            }
        };

    let mut tokens = ThemeTokens::default();
    tokens.set("background", background);
    tokens.set("foreground", foreground);
    tokens.set("card", card);
    tokens.set("card-foreground", foreground);
    tokens.set("popover", card);
    tokens.set("popover-foreground", foreground);
    tokens.set_pair(Role::Primary.name(), Role::Primary.foreground_token(), primary);
    tokens.set_pair(Role::Secondary.name(), Role::Secondary.foreground_token(), secondary);
    tokens.set_pair(Role::Muted.name(), Role::Muted.foreground_token(), muted);
    tokens.set_pair(Role::Accent.name(), Role::Accent.foreground_token(), accent);
    tokens.set("border", border);
    tokens.set("input", border);
    tokens.set_pair("destructive", "destructive-foreground", destructive);
    tokens
}

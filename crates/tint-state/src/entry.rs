#![forbid(unsafe_code)]

//! Palette entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use tint_color::Rgb;
use tint_scheme::{Mode, Role, RoleVariant};

/// Stable identifier of a palette slot.
///
/// Ids are allocated from a per-palette counter and survive regeneration;
/// a slot only gets a fresh id when the palette grows into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One role-assigned color with its light and dark values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub id: EntryId,
    pub role: Role,
    pub light: Rgb,
    pub dark: Rgb,
    /// Locked entries are never touched by regeneration.
    pub locked: bool,
}

impl ColorEntry {
    #[must_use]
    pub fn new(id: EntryId, role: Role, variant: RoleVariant) -> Self {
        Self {
            id,
            role,
            light: variant.light,
            dark: variant.dark,
            locked: false,
        }
    }

    /// The value shown in `mode`.
    #[must_use]
    pub fn color(&self, mode: Mode) -> Rgb {
        match mode {
            Mode::Light => self.light,
            Mode::Dark => self.dark,
        }
    }

    pub(crate) fn set_color(&mut self, mode: Mode, color: Rgb) {
        match mode {
            Mode::Light => self.light = color,
            Mode::Dark => self.dark = color,
        }
    }

    pub(crate) fn set_variant(&mut self, variant: RoleVariant) {
        self.light = variant.light;
        self.dark = variant.dark;
    }
}

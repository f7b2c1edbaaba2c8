#![forbid(unsafe_code)]

//! Palette state and its reducer.
//!
//! [`PaletteState`] is an immutable value; every mutation goes through
//! [`update`], which takes the current state and an [`Action`] and returns
//! the next state. The shared store in [`crate::store`] wraps the reducer
//! with locking, publication and change notification.
//!
//! # Invariants
//!
//! 1. `entries().len() == size().get()`.
//! 2. `entries()[i].role == Role::ALL[i]`.
//! 3. Regeneration never changes a locked entry.
//! 4. Entry ids are unique within a palette and survive regeneration.

use std::fmt;

use serde::{Deserialize, Serialize};
use tint_color::Rgb;
use tint_scheme::{
    Mode, RandomSource, Role, Scheme, Strategy, StrategyInfo, ThemeTokens, derive_tokens,
    generate_scheme,
};
use tracing::{debug, debug_span, warn};

use crate::entry::{ColorEntry, EntryId};

/// Number of color slots in a palette, always within `3..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PaletteSize(u8);

impl PaletteSize {
    pub const MIN: usize = 3;
    pub const MAX: usize = Role::COUNT;
    /// Size of a freshly created palette.
    pub const DEFAULT: PaletteSize = PaletteSize(5);

    pub fn new(size: usize) -> Result<Self, PaletteSizeError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size as u8))
        } else {
            Err(PaletteSizeError { requested: size })
        }
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PaletteSize {
    type Error = PaletteSizeError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PaletteSize> for usize {
    fn from(size: PaletteSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PaletteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A palette size outside `3..=6` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSizeError {
    pub requested: usize,
}

impl fmt::Display for PaletteSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "palette size {} is outside {}..={}",
            self.requested,
            PaletteSize::MIN,
            PaletteSize::MAX
        )
    }
}

impl std::error::Error for PaletteSizeError {}

/// No entry with the given id exists in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryNotFound {
    pub id: EntryId,
}

impl fmt::Display for EntryNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no palette entry with id {}", self.id)
    }
}

impl std::error::Error for EntryNotFound {}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace every unlocked entry from a freshly generated scheme.
    Regenerate,
    /// Flip the lock of one entry.
    ToggleLock(EntryId),
    /// Overwrite one mode's value of an entry. Invalid hex is ignored.
    SetColor {
        id: EntryId,
        hex: String,
        mode: Mode,
    },
    /// Grow or shrink the palette.
    Resize(PaletteSize),
    /// Switch strategy without regenerating.
    SetStrategy(Strategy),
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Regenerate => "regenerate",
            Action::ToggleLock(_) => "toggle-lock",
            Action::SetColor { .. } => "set-color",
            Action::Resize(_) => "resize",
            Action::SetStrategy(_) => "set-strategy",
        }
    }
}

/// The current palette: strategy, metadata and one entry per slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteState {
    size: PaletteSize,
    strategy: Strategy,
    /// Metadata of the most recently generated scheme.
    info: &'static StrategyInfo,
    entries: Vec<ColorEntry>,
    #[serde(skip)]
    next_id: u64,
}

impl PaletteState {
    /// Build a palette of `size` slots from a new scheme.
    pub fn new<R: RandomSource + ?Sized>(
        size: PaletteSize,
        strategy: Strategy,
        base: Option<Rgb>,
        rng: &mut R,
    ) -> Self {
        Self::from_scheme(size, &generate_scheme(strategy, base, rng))
    }

    /// Build a palette of `size` slots from the first roles of `scheme`.
    #[must_use]
    pub fn from_scheme(size: PaletteSize, scheme: &Scheme) -> Self {
        let entries: Vec<ColorEntry> = scheme
            .take(size.get())
            .enumerate()
            .map(|(idx, (role, variant))| ColorEntry::new(EntryId::new(idx as u64), role, variant))
            .collect();
        Self {
            size,
            strategy: scheme.strategy,
            info: scheme.info,
            next_id: entries.len() as u64,
            entries,
        }
    }

    #[must_use]
    pub fn size(&self) -> PaletteSize {
        self.size
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn info(&self) -> &'static StrategyInfo {
        self.info
    }

    #[must_use]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&ColorEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entry ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// `(role, color)` for every slot, in priority order.
    #[must_use]
    pub fn active_colors(&self, mode: Mode) -> Vec<(Role, Rgb)> {
        self.entries
            .iter()
            .map(|entry| (entry.role, entry.color(mode)))
            .collect()
    }

    /// The primary slot's color.
    #[must_use]
    pub fn primary(&self, mode: Mode) -> Rgb {
        self.entries
            .first()
            .map_or(Rgb::BLACK, |entry| entry.color(mode))
    }

    /// Full theme tokens for `mode`.
    #[must_use]
    pub fn tokens(&self, mode: Mode) -> ThemeTokens {
        derive_tokens(&self.active_colors(mode), self.primary(mode), mode)
    }

    fn entry_mut(&mut self, id: EntryId) -> Option<&mut ColorEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Randomness is drawn from `rng` only by [`Action::Regenerate`] and by
/// [`Action::Resize`] when growing.
pub fn update<R: RandomSource + ?Sized>(
    state: &PaletteState,
    action: &Action,
    rng: &mut R,
) -> PaletteState {
    let _span = debug_span!("palette.update", action = action.name()).entered();
    let mut next = state.clone();
    match action {
        Action::Regenerate => regenerate(&mut next, rng),
        Action::ToggleLock(id) => match next.entry_mut(*id) {
            Some(entry) => {
                entry.locked = !entry.locked;
                debug!(id = %id, locked = entry.locked, "lock toggled");
            }
            None => debug!(id = %id, "toggle-lock for unknown entry ignored"),
        },
        Action::SetColor { id, hex, mode } => set_color(&mut next, *id, hex, *mode),
        Action::Resize(size) => resize(&mut next, *size, rng),
        Action::SetStrategy(strategy) => {
            debug!(from = %next.strategy, to = %strategy, "strategy set");
            next.strategy = *strategy;
        }
    }
    next
}

fn regenerate<R: RandomSource + ?Sized>(state: &mut PaletteState, rng: &mut R) {
    let scheme = generate_scheme(state.strategy, None, rng);
    let mut kept = 0usize;
    for (entry, (_, variant)) in state.entries.iter_mut().zip(scheme.iter()) {
        if entry.locked {
            kept += 1;
        } else {
            entry.set_variant(variant);
        }
    }
    state.info = scheme.info;
    debug!(
        strategy = %state.strategy,
        base = %scheme.base,
        locked = kept,
        "palette regenerated"
    );
}

fn set_color(state: &mut PaletteState, id: EntryId, hex: &str, mode: Mode) {
    let color = match Rgb::parse_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!(id = %id, input = %hex, error = %err, "rejected color input");
            return;
        }
    };
    match state.entry_mut(id) {
        Some(entry) => {
            entry.set_color(mode, color);
            debug!(id = %id, mode = %mode, color = %color, "color set");
        }
        None => debug!(id = %id, "set-color for unknown entry ignored"),
    }
}

fn resize<R: RandomSource + ?Sized>(state: &mut PaletteState, size: PaletteSize, rng: &mut R) {
    let current = state.size.get();
    let target = size.get();
    if target == current {
        return;
    }
    if target < current {
        state.entries.truncate(target);
    } else {
        let scheme = generate_scheme(state.strategy, None, rng);
        for (role, variant) in scheme.iter().skip(current).take(target - current) {
            let id = state.allocate_id();
            state.entries.push(ColorEntry::new(id, role, variant));
        }
    }
    state.size = size;
    debug!(from = current, to = target, "palette resized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use tint_scheme::RoleVariant;
    use tracing_test::traced_test;

    fn palette(size: usize) -> (PaletteState, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(11);
        let state = PaletteState::new(
            PaletteSize::new(size).unwrap(),
            Strategy::Analogous,
            Some(Rgb::from_u32(0x3366cc)),
            &mut rng,
        );
        (state, rng)
    }

    fn id(state: &PaletteState, slot: usize) -> EntryId {
        state.entries()[slot].id
    }

    #[test]
    fn new_palette_follows_role_order() {
        let (state, _) = palette(5);
        assert_eq!(state.entries().len(), 5);
        for (slot, entry) in state.entries().iter().enumerate() {
            assert_eq!(entry.role, Role::ALL[slot]);
            assert!(!entry.locked);
        }
        assert_eq!(state.primary(Mode::Light), Rgb::from_u32(0x3366cc));
        assert_eq!(state.info().name, "Analogous Harmony");
    }

    #[test]
    fn palette_size_rejects_out_of_range() {
        assert_eq!(PaletteSize::new(2), Err(PaletteSizeError { requested: 2 }));
        assert!(PaletteSize::new(7).is_err());
        assert_eq!(PaletteSize::new(6).map(PaletteSize::get), Ok(6));
        assert_eq!(PaletteSize::default().get(), 5);
        assert!(serde_json::from_str::<PaletteSize>("9").is_err());
    }

    #[test]
    fn regenerate_keeps_locked_entries_and_ids() {
        let (state, mut rng) = palette(4);
        let locked = id(&state, 1);
        let state = update(&state, &Action::ToggleLock(locked), &mut rng);
        let next = update(&state, &Action::Regenerate, &mut rng);

        assert_eq!(next.entries()[1], state.entries()[1]);
        assert_ne!(next.entries()[0].light, state.entries()[0].light);
        assert_eq!(next.ids().collect::<Vec<_>>(), state.ids().collect::<Vec<_>>());
    }

    #[test]
    fn regenerate_refreshes_metadata_after_strategy_change() {
        let (state, mut rng) = palette(3);
        let state = update(&state, &Action::SetStrategy(Strategy::Tetradic), &mut rng);
        assert_eq!(state.strategy(), Strategy::Tetradic);
        assert_eq!(state.info().name, "Analogous Harmony");
        let state = update(&state, &Action::Regenerate, &mut rng);
        assert_eq!(state.info().name, "Tetradic Richness");
    }

    #[test]
    fn set_strategy_does_not_touch_colors() {
        let (state, mut rng) = palette(5);
        let next = update(&state, &Action::SetStrategy(Strategy::Triadic), &mut rng);
        assert_eq!(next.entries(), state.entries());
    }

    #[test]
    fn toggle_lock_twice_restores() {
        let (state, mut rng) = palette(3);
        let target = id(&state, 2);
        let once = update(&state, &Action::ToggleLock(target), &mut rng);
        assert!(once.entry(target).unwrap().locked);
        let twice = update(&once, &Action::ToggleLock(target), &mut rng);
        assert_eq!(twice, state);
    }

    #[test]
    fn set_color_writes_one_mode() {
        let (state, mut rng) = palette(3);
        let target = id(&state, 0);
        let next = update(
            &state,
            &Action::SetColor {
                id: target,
                hex: "#ABCDEF".into(),
                mode: Mode::Dark,
            },
            &mut rng,
        );
        let entry = next.entry(target).unwrap();
        assert_eq!(entry.dark, Rgb::from_u32(0xabcdef));
        assert_eq!(entry.light, state.entries()[0].light);
    }

    #[test]
    #[traced_test]
    fn invalid_color_is_ignored_and_logged() {
        let (state, mut rng) = palette(3);
        let next = update(
            &state,
            &Action::SetColor {
                id: id(&state, 0),
                hex: "not-a-color".into(),
                mode: Mode::Light,
            },
            &mut rng,
        );
        assert_eq!(next, state);
        assert!(logs_contain("rejected color input"));
    }

    #[test]
    fn resize_grow_fills_only_new_slots() {
        let (state, mut rng) = palette(3);
        let grown = update(&state, &Action::Resize(PaletteSize::new(6).unwrap()), &mut rng);
        assert_eq!(grown.entries().len(), 6);
        assert_eq!(&grown.entries()[..3], state.entries());
        let roles: Vec<Role> = grown.entries().iter().map(|e| e.role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
        let mut ids: Vec<EntryId> = grown.ids().collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    fn variant_of(entry: &ColorEntry) -> RoleVariant {
        RoleVariant {
            light: entry.light,
            dark: entry.dark,
        }
    }

    #[test]
    fn regenerate_assigns_each_unlocked_slot_its_role() {
        let mut rng = SmallRng::seed_from_u64(23);
        let state = PaletteState::new(
            PaletteSize::new(6).unwrap(),
            Strategy::Triadic,
            None,
            &mut rng,
        );
        let state = update(&state, &Action::ToggleLock(id(&state, 2)), &mut rng);

        let expected = generate_scheme(Strategy::Triadic, None, &mut rng.clone());
        let next = update(&state, &Action::Regenerate, &mut rng);

        assert_eq!(next.entries()[2], state.entries()[2]);
        for (slot, entry) in next.entries().iter().enumerate() {
            assert_eq!(entry.role, Role::ALL[slot]);
            if slot != 2 {
                assert_eq!(variant_of(entry), expected.color(Role::ALL[slot]), "slot {slot}");
            }
        }
    }

    #[test]
    fn resize_grow_takes_new_slots_from_fresh_scheme() {
        let (state, mut rng) = palette(3);
        let expected = generate_scheme(state.strategy(), None, &mut rng.clone());
        let grown = update(&state, &Action::Resize(PaletteSize::new(6).unwrap()), &mut rng);
        for slot in 3..6 {
            let entry = &grown.entries()[slot];
            assert_eq!(variant_of(entry), expected.color(Role::ALL[slot]), "slot {slot}");
        }
    }

    #[test]
    fn resize_shrink_truncates_without_regenerating() {
        let (state, mut rng) = palette(6);
        let shrunk = update(&state, &Action::Resize(PaletteSize::new(3).unwrap()), &mut rng);
        assert_eq!(shrunk.entries(), &state.entries()[..3]);
        assert_eq!(shrunk.size().get(), 3);
    }

    #[test]
    fn resize_to_same_size_is_noop() {
        let (state, mut rng) = palette(4);
        let next = update(&state, &Action::Resize(state.size()), &mut rng);
        assert_eq!(next, state);
    }

    #[test]
    #[traced_test]
    fn transitions_are_logged() {
        let (state, mut rng) = palette(3);
        let _ = update(&state, &Action::Resize(PaletteSize::new(5).unwrap()), &mut rng);
        assert!(logs_contain("palette resized"));
        let _ = update(&state, &Action::Regenerate, &mut rng);
        assert!(logs_contain("palette regenerated"));
    }

    #[test]
    fn tokens_cover_small_palettes() {
        let (state, _) = palette(3);
        let tokens = state.tokens(Mode::Light);
        assert!(tokens.contains("muted"));
        assert!(tokens.contains("muted-foreground"));
        assert_eq!(tokens.get("primary"), Some(Rgb::from_u32(0x3366cc)));
    }
}

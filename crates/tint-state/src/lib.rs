#![forbid(unsafe_code)]

//! Palette state machine for tint.
//!
//! # Role in tint
//! `tint-state` owns the palette a user is editing: which strategy is
//! active, how many slots there are, and which colors are locked. Front ends
//! send [`Action`]s to a [`PaletteStore`] and subscribe to its snapshots;
//! the reducer underneath is a plain function over [`PaletteState`] values.
//!
//! # This crate provides
//! - [`PaletteState`], [`ColorEntry`] and [`EntryId`].
//! - [`Action`] and the pure [`update`] reducer.
//! - [`PaletteStore`] with wait-free snapshots and change subscriptions.
//! - [`PaletteConfig`] loaded from TOML or JSON.

/// Configuration loading and validation.
pub mod config;
/// Palette entries.
pub mod entry;
/// Palette state and reducer.
pub mod state;
/// Shared store.
pub mod store;

pub use config::{ConfigError, LogSection, PaletteConfig, PaletteSection};
pub use entry::{ColorEntry, EntryId};
pub use state::{Action, EntryNotFound, PaletteSize, PaletteSizeError, PaletteState, update};
pub use store::{PaletteStore, SetColorError, StoreOptions, Subscription};

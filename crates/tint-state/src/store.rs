#![forbid(unsafe_code)]

//! Shared palette store with change notification.
//!
//! # Design
//!
//! [`PaletteStore`] owns the current [`PaletteState`] behind an
//! [`ArcSwap`], so readers take wait-free snapshots while writers serialize
//! through a single mutex that also owns the random source. Each dispatch
//! runs the reducer, publishes the new snapshot, bumps the version and then
//! notifies subscribers outside the lock.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each state-changing dispatch.
//! 2. A dispatch that leaves the state unchanged publishes nothing and
//!    notifies nobody.
//! 3. Subscribers are notified in registration order.
//! 4. Dropped [`Subscription`] guards are pruned lazily on the next notify.
//!
//! # Failure Modes
//!
//! - **Poisoned lock**: a panicking subscriber cannot poison the writer
//!   lock since callbacks run after it is released; other poisoned locks
//!   are recovered with `into_inner`.
//! - **Re-entrant dispatch**: calling [`PaletteStore::dispatch`] from a
//!   subscriber is allowed and produces a nested notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use arc_swap::ArcSwap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tint_color::{ColorParseError, Rgb};
use tint_scheme::{Mode, Strategy, ThemeTokens};
use tracing::{debug, debug_span};

use crate::config::{ConfigError, PaletteConfig};
use crate::entry::EntryId;
use crate::state::{Action, EntryNotFound, PaletteSize, PaletteState, update};

type Listener = dyn Fn(&PaletteState, u64) + Send + Sync;

/// Store behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Regenerate unlocked entries whenever the strategy changes.
    pub auto_regenerate: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            auto_regenerate: true,
        }
    }
}

/// Error returned by [`PaletteStore::try_set_color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetColorError {
    Parse(ColorParseError),
    NotFound(EntryNotFound),
}

impl std::fmt::Display for SetColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid color: {e}"),
            Self::NotFound(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SetColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::NotFound(e) => Some(e),
        }
    }
}

impl From<ColorParseError> for SetColorError {
    fn from(e: ColorParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<EntryNotFound> for SetColorError {
    fn from(e: EntryNotFound) -> Self {
        Self::NotFound(e)
    }
}

/// Thread-safe palette container.
pub struct PaletteStore {
    current: ArcSwap<PaletteState>,
    rng: Mutex<SmallRng>,
    version: AtomicU64,
    subscribers: Mutex<Vec<Weak<Listener>>>,
    options: StoreOptions,
}

impl std::fmt::Debug for PaletteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteStore")
            .field("state", &self.snapshot())
            .field("version", &self.version())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PaletteStore {
    /// Wrap an existing state. `rng` feeds every later regeneration.
    #[must_use]
    pub fn new(initial: PaletteState, rng: SmallRng, options: StoreOptions) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            rng: Mutex::new(rng),
            version: AtomicU64::new(0),
            subscribers: Mutex::new(Vec::new()),
            options,
        }
    }

    /// Build a store from configuration: initial palette, seed and options.
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        config.ensure_valid()?;
        let mut rng = match config.palette.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let initial = PaletteState::new(
            config.palette_size()?,
            config.strategy(),
            config.base_color()?,
            &mut rng,
        );
        Ok(Self::new(initial, rng, config.store_options()))
    }

    #[must_use]
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// The current state. Never blocks.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PaletteState> {
        self.current.load_full()
    }

    /// Number of state-changing dispatches so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Tokens for the current state.
    #[must_use]
    pub fn tokens(&self, mode: Mode) -> ThemeTokens {
        self.current.load().tokens(mode)
    }

    /// Apply `action`. Returns whether the state changed.
    pub fn dispatch(&self, action: Action) -> bool {
        let _span = debug_span!("store.dispatch", action = action.name()).entered();
        let (next, version) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            let current = self.current.load_full();
            let mut next = update(&current, &action, &mut *rng);
            let strategy_changed = next.strategy() != current.strategy();
            if self.options.auto_regenerate && strategy_changed {
                next = update(&next, &Action::Regenerate, &mut *rng);
            }
            if next == *current {
                debug!("state unchanged");
                return false;
            }
            let next = Arc::new(next);
            self.current.store(Arc::clone(&next));
            let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
            (next, version)
        };
        debug!(version, "state published");
        self.notify(&next, version);
        true
    }

    /// Register `callback` for every state change.
    ///
    /// Dropping the returned guard unsubscribes.
    pub fn subscribe(
        &self,
        callback: impl Fn(&PaletteState, u64) + Send + Sync + 'static,
    ) -> Subscription {
        let strong: Arc<Listener> = Arc::new(callback);
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn notify(&self, state: &PaletteState, version: u64) {
        let callbacks: Vec<Arc<Listener>> = {
            let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subscribers.retain(|w| w.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        if callbacks.is_empty() {
            return;
        }
        let _span = debug_span!("store.notify", version, subscribers = callbacks.len()).entered();
        for callback in &callbacks {
            callback(state, version);
        }
    }

    pub fn regenerate(&self) -> bool {
        self.dispatch(Action::Regenerate)
    }

    pub fn toggle_lock(&self, id: EntryId) -> bool {
        self.dispatch(Action::ToggleLock(id))
    }

    /// Lenient color update: invalid input is logged and ignored.
    pub fn set_color(&self, id: EntryId, hex: impl Into<String>, mode: Mode) -> bool {
        self.dispatch(Action::SetColor {
            id,
            hex: hex.into(),
            mode,
        })
    }

    /// Strict color update: rejects malformed hex and unknown ids.
    pub fn try_set_color(&self, id: EntryId, hex: &str, mode: Mode) -> Result<bool, SetColorError> {
        let color = Rgb::parse_hex(hex)?;
        if self.current.load().entry(id).is_none() {
            return Err(EntryNotFound { id }.into());
        }
        Ok(self.dispatch(Action::SetColor {
            id,
            hex: color.to_hex(),
            mode,
        }))
    }

    pub fn resize(&self, size: PaletteSize) -> bool {
        self.dispatch(Action::Resize(size))
    }

    pub fn set_strategy(&self, strategy: Strategy) -> bool {
        self.dispatch(Action::SetStrategy(strategy))
    }
}

/// RAII guard for a store subscriber.
pub struct Subscription {
    _guard: Box<dyn std::any::Any + Send + Sync>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;
    use tracing_test::traced_test;

    fn store(options: StoreOptions) -> PaletteStore {
        let mut rng = SmallRng::seed_from_u64(5);
        let state = PaletteState::new(PaletteSize::DEFAULT, Strategy::Analogous, None, &mut rng);
        PaletteStore::new(state, rng, options)
    }

    fn first_id(store: &PaletteStore) -> EntryId {
        store.snapshot().entries()[0].id
    }

    #[test]
    fn dispatch_publishes_and_bumps_version() {
        let store = store(StoreOptions::default());
        let before = store.snapshot();
        assert!(store.regenerate());
        assert_eq!(store.version(), 1);
        assert_ne!(*store.snapshot(), *before);
        assert_eq!(before.entries().len(), 5);
    }

    #[test]
    fn unchanged_state_is_not_published() {
        let store = store(StoreOptions::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let _sub = store.subscribe(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert!(!store.resize(PaletteSize::DEFAULT));
        assert!(!store.set_color(first_id(&store), "zzz", Mode::Light));
        assert_eq!(store.version(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscribers_see_each_change_until_dropped() {
        let store = store(StoreOptions::default());
        let versions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&versions);
        let sub = store.subscribe(move |state, version| {
            sink.lock().unwrap().push((version, state.entries().len()));
        });

        store.resize(PaletteSize::new(3).unwrap());
        store.resize(PaletteSize::new(6).unwrap());
        drop(sub);
        store.regenerate();

        assert_eq!(*versions.lock().unwrap(), vec![(1, 3), (2, 6)]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn strategy_change_regenerates_when_enabled() {
        let store = store(StoreOptions::default());
        let before = store.snapshot();
        assert!(store.set_strategy(Strategy::Complementary));
        let after = store.snapshot();
        assert_eq!(after.strategy(), Strategy::Complementary);
        assert_eq!(after.info().name, "Complementary Contrast");
        assert_ne!(after.entries()[0].light, before.entries()[0].light);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn strategy_change_is_pure_when_disabled() {
        let store = store(StoreOptions {
            auto_regenerate: false,
        });
        let before = store.snapshot();
        assert!(store.set_strategy(Strategy::Complementary));
        let after = store.snapshot();
        assert_eq!(after.entries(), before.entries());
        assert_eq!(after.info().name, "Analogous Harmony");
    }

    #[test]
    fn locked_entries_survive_store_regeneration() {
        let store = store(StoreOptions::default());
        let id = first_id(&store);
        store.toggle_lock(id);
        let locked = *store.snapshot().entry(id).unwrap();
        for _ in 0..5 {
            store.regenerate();
        }
        store.set_strategy(Strategy::Tetradic);
        assert_eq!(*store.snapshot().entry(id).unwrap(), locked);
    }

    #[test]
    fn try_set_color_reports_errors() {
        let store = store(StoreOptions::default());
        let id = first_id(&store);
        assert!(matches!(
            store.try_set_color(id, "#12345", Mode::Light),
            Err(SetColorError::Parse(_))
        ));
        assert_eq!(
            store.try_set_color(EntryId::new(99), "#123456", Mode::Light),
            Err(SetColorError::NotFound(EntryNotFound {
                id: EntryId::new(99)
            }))
        );
        assert_eq!(store.try_set_color(id, "ABC", Mode::Dark), Ok(true));
        assert_eq!(store.snapshot().entry(id).unwrap().dark, Rgb::from_u32(0xaabbcc));
    }

    #[test]
    fn concurrent_dispatch_counts_every_change() {
        let store = Arc::new(store(StoreOptions::default()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.regenerate();
                        let snapshot = store.snapshot();
                        assert_eq!(snapshot.entries().len(), snapshot.size().get());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.version(), 100);
    }

    #[test]
    fn from_config_is_reproducible_with_seed() {
        let config = PaletteConfig::from_toml_str(
            "[palette]\nsize = 4\nstrategy = \"triadic\"\nseed = 9\n",
        )
        .unwrap();
        let a = PaletteStore::from_config(&config).unwrap();
        let b = PaletteStore::from_config(&config).unwrap();
        assert_eq!(*a.snapshot(), *b.snapshot());
        a.regenerate();
        b.regenerate();
        assert_eq!(*a.snapshot(), *b.snapshot());
        assert_eq!(a.snapshot().size().get(), 4);
    }

    #[test]
    #[traced_test]
    fn dispatch_is_logged() {
        let store = store(StoreOptions::default());
        store.regenerate();
        assert!(logs_contain("state published"));
    }
}

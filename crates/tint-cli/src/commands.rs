//! Subcommand arguments and handlers.
//!
//! Every handler writes its report to `out` and returns; nothing here exits
//! the process.

use std::io::Write;

use clap::Args;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use serde_json::json;
use tint_color::{Rgb, contrast_ratio, meets_wcag_aa, meets_wcag_aaa};
use tint_scheme::{Mode, Strategy, compute_foreground, derive_dark_variant, generate_scheme};
use tint_state::{EntryId, PaletteConfig, PaletteSize, PaletteState, PaletteStore};
use tracing::debug;

use crate::error::{Result, TintError};

/// Generation inputs shared by `scheme`, `tokens` and `palette`.
///
/// Anything left unset falls back to the loaded config.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerationArgs {
    /// Harmony strategy id, e.g. `triadic` or `split-complementary`.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Base color as `#rrggbb`; random when omitted.
    #[arg(long)]
    pub base: Option<String>,

    /// RNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GenerationArgs {
    /// Merge onto `config`, validating the result.
    fn apply(&self, config: &PaletteConfig) -> Result<PaletteConfig> {
        let mut merged = config.clone();
        if let Some(strategy) = &self.strategy {
            let strategy: Strategy = strategy.parse()?;
            merged.palette.strategy = strategy.id().to_string();
        }
        if let Some(base) = &self.base {
            merged.palette.base = Some(Rgb::parse_hex(base)?.to_hex());
        }
        if self.seed.is_some() {
            merged.palette.seed = self.seed;
        }
        merged.ensure_valid()?;
        Ok(merged)
    }
}

fn rng_for(config: &PaletteConfig) -> SmallRng {
    match config.palette.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

// ---------------------------------------------------------------------------
// strategies
// ---------------------------------------------------------------------------

pub fn run_strategies(json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        let list: Vec<_> = Strategy::ALL
            .iter()
            .map(|s| {
                json!({
                    "id": s.id(),
                    "label": s.label(),
                    "info": s.info(),
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?;
        return Ok(());
    }
    for strategy in Strategy::ALL {
        writeln!(
            out,
            "{:<20} {:<20} {}",
            strategy.id(),
            strategy.label(),
            strategy.info().mood
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// scheme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct SchemeArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

pub fn run_scheme(
    args: &SchemeArgs,
    config: &PaletteConfig,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let config = args.generation.apply(config)?;
    let mut rng = rng_for(&config);
    let scheme = generate_scheme(config.strategy(), config.base_color()?, &mut rng);
    debug!(strategy = %scheme.strategy, base = %scheme.base, "scheme ready");

    if json {
        let roles: serde_json::Map<String, serde_json::Value> = scheme
            .iter()
            .map(|(role, variant)| (role.name().to_string(), json!(variant)))
            .collect();
        let report = json!({
            "strategy": scheme.strategy,
            "base": scheme.base,
            "info": scheme.info,
            "roles": roles,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "{} ({})", scheme.name(), scheme.strategy)?;
    writeln!(out, "base: {}", scheme.base)?;
    writeln!(out, "mood: {}", scheme.mood())?;
    writeln!(out, "tags: {}", scheme.tags().join(", "))?;
    writeln!(out)?;
    writeln!(out, "{:<10} {:<8} {:<8}", "role", "light", "dark")?;
    for (role, variant) in scheme.iter() {
        writeln!(out, "{:<10} {} {}", role.name(), variant.light, variant.dark)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// dark / foreground
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Args)]
pub struct ColorArgs {
    /// Color as `#rrggbb` or `#rgb`.
    pub color: String,
}

pub fn run_dark(args: &ColorArgs, json: bool, out: &mut dyn Write) -> Result<()> {
    let light = Rgb::parse_hex(&args.color)?;
    let dark = derive_dark_variant(light);
    if json {
        writeln!(out, "{}", json!({ "light": light, "dark": dark }))?;
    } else {
        writeln!(out, "{dark}")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ForegroundReport {
    background: Rgb,
    foreground: Rgb,
    ratio: f64,
    meets_aa: bool,
    meets_aaa: bool,
}

pub fn run_foreground(args: &ColorArgs, json: bool, out: &mut dyn Write) -> Result<()> {
    let background = Rgb::parse_hex(&args.color)?;
    let foreground = compute_foreground(background);
    let ratio = contrast_ratio(foreground, background);
    let report = ForegroundReport {
        background,
        foreground,
        ratio,
        meets_aa: meets_wcag_aa(foreground, background),
        meets_aaa: meets_wcag_aaa(foreground, background),
    };
    if json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        let verdict = if report.meets_aaa {
            "AAA"
        } else if report.meets_aa {
            "AA"
        } else {
            "below AA"
        };
        writeln!(out, "{} {:.2}:1 ({verdict})", report.foreground, report.ratio)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct TokensArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Number of palette slots (3 to 6).
    #[arg(long)]
    pub size: Option<usize>,

    /// Derive dark-mode tokens.
    #[arg(long)]
    pub dark: bool,

    /// Emit CSS custom properties.
    #[arg(long)]
    pub css: bool,
}

pub fn run_tokens(
    args: &TokensArgs,
    config: &PaletteConfig,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if args.css && json {
        return Err(TintError::invalid("--css and --json are mutually exclusive"));
    }
    let mut config = args.generation.apply(config)?;
    if let Some(size) = args.size {
        config.palette.size = PaletteSize::new(size)?.get();
    }
    let state = PaletteState::new(
        config.palette_size()?,
        config.strategy(),
        config.base_color()?,
        &mut rng_for(&config),
    );
    let mode = Mode::from_dark(args.dark);
    let tokens = state.tokens(mode);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tokens)?)?;
    } else if args.css {
        let selector = if mode.is_dark() { ".dark" } else { ":root" };
        writeln!(out, "{selector} {{")?;
        for line in tokens.css_declarations().lines() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "}}")?;
    } else {
        for (name, color) in tokens.iter() {
            writeln!(out, "{name:<24} {color}")?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// palette
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct PaletteArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Slots to lock before anything else, e.g. `0,2`.
    #[arg(long, value_delimiter = ',')]
    pub lock: Vec<usize>,

    /// Regenerate unlocked slots this many times.
    #[arg(long, default_value_t = 0)]
    pub regenerate: usize,

    /// Resize to this many slots after regenerating.
    #[arg(long)]
    pub resize: Option<usize>,
}

pub fn run_palette(
    args: &PaletteArgs,
    config: &PaletteConfig,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let resize = args.resize.map(PaletteSize::new).transpose()?;
    let store = PaletteStore::from_config(&args.generation.apply(config)?)?;

    let ids: Vec<EntryId> = store.snapshot().ids().collect();
    for &slot in &args.lock {
        let id = ids.get(slot).copied().ok_or_else(|| {
            TintError::invalid(format!("cannot lock slot {slot}: palette has {} slots", ids.len()))
        })?;
        if !store.snapshot().entry(id).is_some_and(|entry| entry.locked) {
            store.toggle_lock(id);
        }
    }
    for _ in 0..args.regenerate {
        store.regenerate();
    }
    if let Some(size) = resize {
        store.resize(size);
    }

    let state = store.snapshot();
    debug!(version = store.version(), slots = state.entries().len(), "palette ready");
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&*state)?)?;
        return Ok(());
    }

    writeln!(out, "{} ({} slots)", state.info().name, state.size())?;
    for (slot, entry) in state.entries().iter().enumerate() {
        let mut line = format!("{slot} {:<10} {} {}", entry.role.name(), entry.light, entry.dark);
        if entry.locked {
            line.push_str(" locked");
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}


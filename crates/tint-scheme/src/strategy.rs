#![forbid(unsafe_code)]

//! Harmony strategies and their descriptive metadata.

use std::fmt;
use std::str::FromStr;

/// A color-harmony algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// One hue, varied saturation and lightness.
    Monochromatic,
    /// Neighbours within ±30° of the base hue.
    #[default]
    Analogous,
    /// Base hue and its opposite.
    Complementary,
    /// Three hues 120° apart.
    Triadic,
    /// Base hue and the two neighbours of its complement.
    SplitComplementary,
    /// Two complementary pairs 90° apart.
    Tetradic,
}

/// Static, human-facing description of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrategyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub mood: &'static str,
    pub use_cases: &'static [&'static str],
    pub tags: &'static [&'static str],
}

static INFO: [StrategyInfo; 6] = [
    StrategyInfo {
        name: "Monochromatic Harmony",
        description: "Cohesive palette built from variations of a single hue. Saturation and \
                      lightness carry all of the hierarchy, which keeps interfaces calm and \
                      makes the primary brand color unmistakable.",
        mood: "Calm, focused and understated",
        use_cases: &[
            "Minimal dashboards",
            "Documentation sites",
            "Single-brand marketing pages",
            "Reading-heavy apps",
        ],
        tags: &["cohesive", "minimal", "subtle", "elegant"],
    },
    StrategyInfo {
        name: "Analogous Harmony",
        description: "Naturally harmonious neighbours on the color wheel. The secondary and \
                      accent roles sit thirty degrees either side of the base, giving variety \
                      without any clashing pairs.",
        mood: "Warm, natural and balanced",
        use_cases: &[
            "Lifestyle and wellness products",
            "Content platforms",
            "Onboarding flows",
            "Portfolio sites",
        ],
        tags: &["harmonious", "natural", "soft", "balanced"],
    },
    StrategyInfo {
        name: "Complementary Contrast",
        description: "High contrast between the base hue and its direct opposite. The \
                      complement is reserved for the accent so calls to action stand out \
                      against an otherwise single-hue interface.",
        mood: "Bold, energetic and direct",
        use_cases: &[
            "Landing pages",
            "Call-to-action heavy flows",
            "Sports and gaming",
            "Promotional campaigns",
        ],
        tags: &["contrast", "bold", "vibrant", "attention"],
    },
    StrategyInfo {
        name: "Triadic Balance",
        description: "Three hues spaced evenly around the wheel. Each role gets a distinct \
                      identity while saturation is tempered so that no single hue dominates.",
        mood: "Playful, lively and balanced",
        use_cases: &[
            "Education products",
            "Children's apps",
            "Data visualization",
            "Creative tools",
        ],
        tags: &["balanced", "playful", "colorful", "diverse"],
    },
    StrategyInfo {
        name: "Split Complementary",
        description: "The base hue paired with the two neighbours of its complement. Keeps \
                      most of the punch of a complementary scheme with less tension between \
                      the roles.",
        mood: "Dynamic yet approachable",
        use_cases: &[
            "SaaS products",
            "E-commerce storefronts",
            "Editorial layouts",
            "Brand refreshes",
        ],
        tags: &["versatile", "dynamic", "refined", "contrast"],
    },
    StrategyInfo {
        name: "Tetradic Richness",
        description: "Two complementary pairs forming a rectangle on the wheel. The richest \
                      of the strategies, with enough distinct hues to color-code categories \
                      across a large interface.",
        mood: "Rich, expressive and vibrant",
        use_cases: &[
            "Analytics dashboards",
            "Multi-category catalogs",
            "Games",
            "Design systems with many states",
        ],
        tags: &["rich", "expressive", "complex", "vibrant"],
    },
];

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Monochromatic,
        Strategy::Analogous,
        Strategy::Complementary,
        Strategy::Triadic,
        Strategy::SplitComplementary,
        Strategy::Tetradic,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Strategy::Monochromatic => 0,
            Strategy::Analogous => 1,
            Strategy::Complementary => 2,
            Strategy::Triadic => 3,
            Strategy::SplitComplementary => 4,
            Strategy::Tetradic => 5,
        }
    }

    /// Stable identifier, e.g. `"split-complementary"`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Strategy::Monochromatic => "monochromatic",
            Strategy::Analogous => "analogous",
            Strategy::Complementary => "complementary",
            Strategy::Triadic => "triadic",
            Strategy::SplitComplementary => "split-complementary",
            Strategy::Tetradic => "tetradic",
        }
    }

    /// Short label for selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::Monochromatic => "Monochromatic",
            Strategy::Analogous => "Analogous",
            Strategy::Complementary => "Complementary",
            Strategy::Triadic => "Triadic",
            Strategy::SplitComplementary => "Split Complementary",
            Strategy::Tetradic => "Tetradic",
        }
    }

    /// Descriptive metadata.
    #[must_use]
    pub fn info(self) -> &'static StrategyInfo {
        &INFO[self.index()]
    }

    /// Parse an identifier. Case-insensitive; `_` and spaces count as `-`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized: String = id
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL.into_iter().find(|s| s.id() == normalized)
    }

    /// Parse an identifier, falling back to [`Strategy::Analogous`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_id_lossy(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            tracing::debug!(strategy = %id, "unknown strategy, using analogous");
            Self::default()
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| StrategyParseError {
            input: s.to_string(),
        })
    }
}

/// Error returned by strict strategy parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyParseError {
    pub input: String,
}

impl fmt::Display for StrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Strategy::ALL.iter().map(|s| s.id()).collect();
        write!(
            f,
            "unknown strategy {:?} (expected one of: {})",
            self.input,
            known.join(", ")
        )
    }
}

impl std::error::Error for StrategyParseError {}

#![forbid(unsafe_code)]

//! Semantic color roles.

use std::fmt;

/// A semantic slot a palette color is assigned to.
///
/// Declaration order is significant: a palette of size `n` uses the first
/// `n` roles of [`Role::ALL`], and token derivation falls back in the same
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Muted,
    /// Focus ring.
    Ring,
    Tertiary,
}

impl Role {
    /// All roles in priority order.
    pub const ALL: [Role; 6] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Muted,
        Role::Ring,
        Role::Tertiary,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Role::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Role::Primary => 0,
            Role::Secondary => 1,
            Role::Accent => 2,
            Role::Muted => 3,
            Role::Ring => 4,
            Role::Tertiary => 5,
        }
    }

    /// Token name of the role, e.g. `"ring"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Muted => "muted",
            Role::Ring => "ring",
            Role::Tertiary => "tertiary",
        }
    }

    /// Token name of the paired foreground, e.g. `"accent-foreground"`.
    #[must_use]
    pub const fn foreground_token(self) -> &'static str {
        match self {
            Role::Primary => "primary-foreground",
            Role::Secondary => "secondary-foreground",
            Role::Accent => "accent-foreground",
            Role::Muted => "muted-foreground",
            Role::Ring => "ring-foreground",
            Role::Tertiary => "tertiary-foreground",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_priority_order() {
        for (idx, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), idx);
        }
    }

    #[test]
    fn foreground_tokens_extend_names() {
        for role in Role::ALL {
            assert_eq!(role.foreground_token(), format!("{role}-foreground"));
        }
    }
}

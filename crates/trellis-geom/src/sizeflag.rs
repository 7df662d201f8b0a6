use std::fmt;

use serde::{Deserialize, Serialize};

use super::Dim;

/// How a control's preferred size on one axis relates to its children, its
/// configured limits and its current bounds.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeFlag {
    /// Use the current bound size, ignoring children.
    Fixed,
    /// Computed size, capped at the maximum.
    Shrink,
    /// Computed size, floored at the minimum.
    #[default]
    Expand,
    /// Computed size, unmodified.
    Elastic,
    /// Computed size, floored at the minimum.
    Bloat,
}

impl fmt::Display for SizeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fixed => "Fixed",
            Self::Shrink => "Shrink",
            Self::Expand => "Expand",
            Self::Elastic => "Elastic",
            Self::Bloat => "Bloat",
        };
        f.write_str(s)
    }
}

/// Independent horizontal and vertical sizing policies.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeFlags {
    /// Policy along the X axis.
    pub horizontal: SizeFlag,
    /// Policy along the Y axis.
    pub vertical: SizeFlag,
}

impl SizeFlags {
    /// Construct a policy pair.
    pub fn new(horizontal: SizeFlag, vertical: SizeFlag) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The same policy on both axes.
    pub fn both(flag: SizeFlag) -> Self {
        Self::new(flag, flag)
    }

    /// The policy for an axis.
    pub fn get(&self, dim: Dim) -> SizeFlag {
        match dim {
            Dim::X => self.horizontal,
            Dim::Y => self.vertical,
        }
    }
}

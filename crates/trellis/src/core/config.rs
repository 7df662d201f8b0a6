use serde::{Deserialize, Serialize};

use crate::{
    core::error::{Error, Result},
    geom::{Padding, Rect},
};

/// Case that accelerator strings are folded to before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelCase {
    /// Fold to upper case.
    #[default]
    Upper,
    /// Fold to lower case.
    Lower,
}

impl AccelCase {
    /// Fold a string to this case.
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
        }
    }
}

/// Canvas-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bounds given to newly created controls.
    pub default_bounds: Rect,
    /// Inset of the keyboard focus highlight from the control edge.
    pub keyboard_highlight_inset: i32,
    /// Padding around tooltip text.
    pub tooltip_padding: Padding,
    /// Tab from the last control in the chain returns to the first.
    pub tab_wraps: bool,
    /// Accelerator normalization case.
    pub accelerator_case: AccelCase,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_bounds: Rect::new(0, 0, 10, 10),
            keyboard_highlight_inset: 3,
            tooltip_padding: Padding::new(5, 3, 5, 3),
            tab_wraps: true,
            accelerator_case: AccelCase::Upper,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        if config.keyboard_highlight_inset < 0 {
            return Err(Error::Config(format!(
                "keyboard_highlight_inset must not be negative, got {}",
                config.keyboard_highlight_inset
            )));
        }
        Ok(config)
    }
}

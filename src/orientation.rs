//! # Rotation
//!
//! The rotation states the display tool reports, plus the two-state toggle
//! between them.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// Zero degree rotation.
    Normal,
    /// Screen "Up" will be on the left side.
    Left,
    /// Screen "Up" will be on the right.
    Right,
    /// 180 degree rotation.
    Flip,
}

impl Rotation {
    /// Parse a rotation token as printed by the display tool.
    /// Unknown or empty tokens give `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "flip" | "inverted" => Some(Self::Flip),
            _ => None,
        }
    }

    /// The value passed to `--rotate`.
    pub fn as_arg(&self) -> &'static str {
        match *self {
            Self::Normal => "normal",
            Self::Left => "left",
            Self::Right => "right",
            Self::Flip => "flip",
        }
    }

    /// Where the next activation should go. Anything that is not normal
    /// collapses back to normal.
    pub fn toggled(current: Option<Rotation>) -> Rotation {
        match current {
            Some(Self::Normal) => Self::Right,
            _ => Self::Normal,
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_arg())
    }
}

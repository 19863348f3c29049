#![forbid(unsafe_code)]

//! Panel size variants.

use scrim_core::geometry::{Rect, Size};
use std::fmt;
use std::str::FromStr;

/// Fixed panel size for [`SizeVariant::Small`].
pub const SMALL_PANEL: Size = Size::new(500, 400);

/// Preset panel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "policy-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(rename_all = "lowercase"))]
pub enum SizeVariant {
    /// A fixed 500×400 panel.
    Small,
    /// A panel filling the viewport.
    #[default]
    Full,
}

impl SizeVariant {
    /// Resolve a variant name; anything unrecognized falls back to `Full`.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// Class tokens selecting the panel dimensions.
    pub const fn classes(self) -> &'static str {
        match self {
            Self::Full => "w-full h-full",
            Self::Small => "w-[500px] h-[400px]",
        }
    }

    /// Name used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Small => "small",
        }
    }

    /// Panel rectangle within `viewport`.
    ///
    /// The panel is centered and never larger than the viewport.
    pub fn panel_rect(self, viewport: Rect) -> Rect {
        match self {
            Self::Full => viewport,
            Self::Small => viewport.centered(SMALL_PANEL),
        }
    }
}

/// Error for a variant name that is neither `small` nor `full`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSizeVariant(pub String);

impl fmt::Display for UnknownSizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown size variant {:?} (expected \"small\" or \"full\")", self.0)
    }
}

impl std::error::Error for UnknownSizeVariant {}

impl FromStr for SizeVariant {
    type Err = UnknownSizeVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("small") => Ok(Self::Small),
            s if s.eq_ignore_ascii_case("full") => Ok(Self::Full),
            other => Err(UnknownSizeVariant(other.to_owned())),
        }
    }
}

impl fmt::Display for SizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

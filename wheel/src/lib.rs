pub mod easing;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod scene;
pub mod spin;
pub mod wheel;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::editor::{EditOutcome, EditSession, LabelEditor};
pub use crate::geometry::{LabelAnchor, PathSpec, Point};
pub use crate::scene::WheelScene;
pub use crate::spin::{SpinConfig, SpinOutcome, SpinPhase, Spinner, resolve_winner};
pub use crate::wheel::{Wheel, WheelSnapshot};

pub type WheelResult<T> = Result<T, WheelError>;

/// Labels a wheel starts with when nothing else is configured.
pub const DEFAULT_LABELS: [&str; 8] = [
    "First Prize",
    "Second Prize",
    "Third Prize",
    "Fourth Prize",
    "Fifth Prize",
    "Sixth Prize",
    "Seventh Prize",
    "Eighth Prize",
];

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// One wedge of the wheel. Position in the owning sequence decides both the
/// angular span and the palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub label: String,
    pub color_index: usize,
}

impl Sector {
    pub fn new(label: impl Into<String>, color_index: usize) -> Self {
        Self { label: label.into(), color_index }
    }
}

/// Build the ordered sector sequence for a list of labels.
pub fn sectors_from_labels<S: AsRef<str>>(labels: &[S]) -> Vec<Sector> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| Sector::new(label.as_ref(), idx))
        .collect()
}

/// An sRGB colour, stored opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> WheelResult<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(WheelError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| WheelError::InvalidColor(s.to_string()))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Cyclic colour table. Sector `i` takes slot `i % len`, so any sector count
/// maps onto the table without running off its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = WheelError;

    fn try_from(colors: Vec<Rgb>) -> WheelResult<Self> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb::from_u32(0x4299E1),
                Rgb::from_u32(0x3182CE),
                Rgb::from_u32(0x2B6CB0),
                Rgb::from_u32(0x2C5282),
                Rgb::from_u32(0x2A4365),
                Rgb::from_u32(0x2C5282),
                Rgb::from_u32(0x2B6CB0),
                Rgb::from_u32(0x3182CE),
            ],
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> WheelResult<Self> {
        if colors.is_empty() {
            return Err(WheelError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_for(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    NoSectors,
    SectorOutOfRange { index: usize, total: usize },
    InvalidRadius(f64),
    Spinning,
    EditInProgress { index: usize },
    NoEditSession,
    EmptyPalette,
    InvalidColor(String),
    Export(String),
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelError::NoSectors => write!(f, "wheel needs at least one sector"),
            WheelError::SectorOutOfRange { index, total } => {
                write!(f, "sector {index} out of range for {total} sectors")
            }
            WheelError::InvalidRadius(r) => write!(f, "radius must be positive, got {r}"),
            WheelError::Spinning => write!(f, "wheel is spinning"),
            WheelError::EditInProgress { index } => {
                write!(f, "sector {index} is already being edited")
            }
            WheelError::NoEditSession => write!(f, "no edit session open"),
            WheelError::EmptyPalette => write!(f, "palette needs at least one colour"),
            WheelError::InvalidColor(s) => write!(f, "invalid colour {s:?}"),
            WheelError::Export(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl std::error::Error for WheelError {}

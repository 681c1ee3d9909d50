use log::{LevelFilter, warn};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use wheel_core::{DEFAULT_LABELS, Palette, Rgb, SpinConfig, WheelResult};

pub const DEFAULT_SVG_PATH: &str = "luckywheel.svg";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub labels: Vec<String>,
    pub palette: Palette,
    pub spin: SpinConfig,
    pub svg_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            labels: DEFAULT_LABELS.iter().map(ToString::to_string).collect(),
            palette: Palette::default(),
            spin: SpinConfig::default(),
            svg_path: PathBuf::from(DEFAULT_SVG_PATH),
        }
    }
}

impl AppSettings {
    /// Defaults overridden by `LUCKYWHEEL_*` environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = var("LUCKYWHEEL_LABELS") {
            let labels = parse_labels(&raw);
            if labels.is_empty() {
                warn!("LUCKYWHEEL_LABELS has no usable labels, keeping defaults");
            } else {
                settings.labels = labels;
            }
        }

        if let Some(raw) = var("LUCKYWHEEL_COLORS") {
            match parse_palette(&raw) {
                Ok(palette) => settings.palette = palette,
                Err(e) => warn!("ignoring LUCKYWHEEL_COLORS={raw:?}: {e}"),
            }
        }

        if let Some(raw) = var("LUCKYWHEEL_SPIN_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.spin.duration = Duration::from_millis(ms),
                Err(e) => warn!("ignoring LUCKYWHEEL_SPIN_MS={raw:?}: {e}"),
            }
        }

        if let Some(raw) = var("LUCKYWHEEL_TURNS") {
            match raw.trim().parse::<u32>() {
                Ok(turns) => settings.spin.full_turns = turns,
                Err(e) => warn!("ignoring LUCKYWHEEL_TURNS={raw:?}: {e}"),
            }
        }

        if let Some(path) = var("LUCKYWHEEL_SVG_PATH") {
            settings.svg_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = var("LUCKYWHEEL_LOG") {
            match LevelFilter::from_str(raw.trim()) {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => warn!("ignoring LUCKYWHEEL_LOG={raw:?}"),
            }
        }

        settings
    }
}

fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Comma-separated `#RRGGBB` colours. Blank entries are skipped; any bad
/// entry rejects the whole list.
fn parse_palette(raw: &str) -> WheelResult<Palette> {
    let colors = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Rgb::parse_hex)
        .collect::<WheelResult<Vec<_>>>()?;
    Palette::new(colors)
}

use crate::easing::CubicBezier;
use crate::geometry::{angular_step, sector_at_angle};
use crate::WheelResult;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_FULL_TURNS: u32 = 5;
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(5000);

/// Timing of a spin. `duration` is the one value both the eased transition
/// and the settle timer are built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    pub full_turns: u32,
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            full_turns: DEFAULT_FULL_TURNS,
            duration: DEFAULT_SPIN_DURATION,
            easing: CubicBezier::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// An accepted spin request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Increments with every accepted spin; lets a settle timer tell which spin it belongs to.
    pub spin_id: u64,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SpinOutcome {
    pub fn animation(&self, easing: CubicBezier) -> SpinAnimation {
        SpinAnimation { from: self.from, to: self.to, duration: self.duration, easing }
    }
}

/// Idle/Spinning state machine plus the rotation draw.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    config: SpinConfig,
    phase: SpinPhase,
    spins: u64,
}

impl Spinner {
    pub fn new(config: SpinConfig) -> Self {
        Self { config, phase: SpinPhase::Idle, spins: 0 }
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Start a spin from `current_rotation`. Returns `None` and changes nothing
    /// while a spin is already running.
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        current_rotation: f64,
        rng: &mut R,
    ) -> Option<SpinOutcome> {
        if self.is_spinning() {
            debug!("spin ignored: wheel already spinning");
            return None;
        }
        let offset: f64 = rng.random_range(0.0..360.0);
        let to = current_rotation + 360.0 * f64::from(self.config.full_turns) + offset;

        self.phase = SpinPhase::Spinning;
        self.spins += 1;
        debug!("spin {} accepted: {current_rotation:.2} -> {to:.2}", self.spins);

        Some(SpinOutcome {
            spin_id: self.spins,
            from: current_rotation,
            to,
            duration: self.config.duration,
        })
    }

    /// Timer elapsed: back to idle. Unconditional.
    pub fn settle(&mut self) {
        self.phase = SpinPhase::Idle;
    }
}

/// Sector under the fixed top pointer once the wheel has turned clockwise by
/// `final_rotation` degrees.
pub fn resolve_winner(final_rotation: f64, total: usize) -> WheelResult<usize> {
    let step = angular_step(total)?;
    let under_pointer = (360.0 - final_rotation.rem_euclid(360.0)).rem_euclid(360.0);
    debug!("pointer over wheel angle {under_pointer:.2} (step {step:.2})");
    sector_at_angle(under_pointer, total)
}

/// Eased interpolation of one spin, for surfaces that animate frame by frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinAnimation {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl SpinAnimation {
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        let eased = self.easing.ease(self.progress(elapsed));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

use std::time::{Duration, Instant};
use wheel_core::spin::SpinAnimation;
use wheel_core::Wheel;

// ---------------------------------------------------------------------------
// Spin animation state
// ---------------------------------------------------------------------------

/// A spin that has been accepted and is being animated.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSpin {
    pub spin_id: u64,
    pub animation: SpinAnimation,
    pub started: Instant,
}

impl ActiveSpin {
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }
}

#[derive(Debug, Default)]
pub struct AnimationState {
    pub active: Option<ActiveSpin>,
}

impl AnimationState {
    /// Rotation to draw at `now`: the eased in-flight value while a spin is
    /// animating, otherwise the wheel's settled rotation.
    pub fn display_rotation(&self, wheel: &Wheel, now: Instant) -> f64 {
        match &self.active {
            Some(spin) => {
                let elapsed = spin.elapsed(now);
                // Hold on the target until the settle event arrives.
                if spin.animation.is_finished(elapsed) {
                    spin.animation.to
                } else {
                    spin.animation.rotation_at(elapsed)
                }
            }
            None => wheel.rotation_degrees(),
        }
    }
}

// ---------------------------------------------------------------------------
// Spin history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SpinRecord {
    pub spin_id: u64,
    pub winner: usize,
    pub label: String,
    pub rotation_degrees: f64,
    pub at: String,
}

pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Default)]
pub struct HistoryState {
    /// Newest first.
    pub records: Vec<SpinRecord>,
}

impl HistoryState {
    pub fn push(&mut self, record: SpinRecord) {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
    }

    pub fn latest(&self) -> Option<&SpinRecord> {
        self.records.first()
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub wheel: Wheel,
    pub animation: AnimationState,
    pub history: HistoryState,
    /// Sector the edit-mode cursor is on.
    pub cursor: usize,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(wheel: Wheel) -> Self {
        Self {
            wheel,
            animation: AnimationState::default(),
            history: HistoryState::default(),
            cursor: 0,
            status: None,
            show_help: false,
            show_logs: false,
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage { kind, text: text.into() });
    }

    pub fn cursor_next(&mut self) {
        let total = self.wheel.sectors().len();
        if total > 0 {
            self.cursor = (self.cursor + 1) % total;
        }
    }

    pub fn cursor_prev(&mut self) {
        let total = self.wheel.sectors().len();
        if total > 0 {
            self.cursor = (self.cursor + total - 1) % total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::easing::CubicBezier;

    fn record(id: u64) -> SpinRecord {
        SpinRecord {
            spin_id: id,
            winner: 0,
            label: "x".into(),
            rotation_degrees: 0.0,
            at: "12:00:00".into(),
        }
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = AppState::new(Wheel::default());
        state.cursor_prev();
        assert_eq!(state.cursor, 7);
        state.cursor_next();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let mut history = HistoryState::default();
        for id in 1..=(HISTORY_LIMIT as u64 + 5) {
            history.push(record(id));
        }
        assert_eq!(history.records.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().map(|r| r.spin_id), Some(HISTORY_LIMIT as u64 + 5));
    }

    #[test]
    fn display_rotation_tracks_the_animation() {
        let wheel = Wheel::default();
        let started = Instant::now();
        let mut animation = AnimationState::default();
        assert_eq!(animation.display_rotation(&wheel, started), 0.0);

        animation.active = Some(ActiveSpin {
            spin_id: 1,
            animation: SpinAnimation {
                from: 0.0,
                to: 1000.0,
                duration: Duration::from_secs(5),
                easing: CubicBezier::LINEAR,
            },
            started,
        });
        let mid = animation.display_rotation(&wheel, started + Duration::from_millis(2500));
        assert!((mid - 500.0).abs() < 1e-3);
        let done = animation.display_rotation(&wheel, started + Duration::from_secs(6));
        assert_eq!(done, 1000.0);
        // Exactly at the end the target is returned, not an eased approximation.
        let end = animation.display_rotation(&wheel, started + Duration::from_secs(5));
        assert_eq!(end, 1000.0);
    }
}

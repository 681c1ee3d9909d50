use crate::state::app_settings::AppSettings;
use crate::state::app_state::{ActiveSpin, AppState, SpinRecord, StatusKind};
use chrono::Local;
use log::{error, info, warn};
use rand::Rng;
use std::time::Instant;
use wheel_core::scene::{self, DEFAULT_RADIUS, WheelScene};
use wheel_core::{EditOutcome, SpinOutcome, Wheel, WheelResult, export};

/// Which set of key bindings is live.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum InputMode {
    #[default]
    Wheel,
    EditMode,
    EditSession,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let wheel = build_wheel(&settings);

        let app = Self { state: AppState::new(wheel), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn input_mode(&self) -> InputMode {
        if self.state.wheel.edit_session().is_some() {
            InputMode::EditSession
        } else if self.state.show_help {
            InputMode::Help
        } else if self.state.wheel.edit_mode() {
            InputMode::EditMode
        } else {
            InputMode::Wheel
        }
    }

    pub fn scene(&self) -> WheelResult<WheelScene> {
        scene::render(&self.state.wheel.snapshot(), DEFAULT_RADIUS)
    }

    pub fn display_rotation(&self, now: Instant) -> f64 {
        self.state.animation.display_rotation(&self.state.wheel, now)
    }

    pub fn is_animating(&self) -> bool {
        self.state.animation.active.is_some()
    }

    // -----------------------------------------------------------------------
    // Spinning
    // -----------------------------------------------------------------------

    pub fn spin(&mut self) -> Option<SpinOutcome> {
        self.spin_with(&mut rand::rng(), Instant::now())
    }

    /// Start a spin. The caller owns scheduling the settle timer for the
    /// returned outcome's `duration`.
    pub fn spin_with<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Option<SpinOutcome> {
        let outcome = self.state.wheel.spin(rng)?;
        let easing = self.state.wheel.config().easing;
        self.state.animation.active = Some(ActiveSpin {
            spin_id: outcome.spin_id,
            animation: outcome.animation(easing),
            started: now,
        });
        self.state.set_status(StatusKind::Info, "Spinning...");
        info!("spin {} started", outcome.spin_id);
        Some(outcome)
    }

    pub fn on_spin_settled(&mut self, spin_id: u64) {
        let Some(active) = self.state.animation.active else {
            warn!("settle for spin {spin_id} with no spin running");
            return;
        };
        if active.spin_id != spin_id {
            warn!("stale settle for spin {spin_id}, current is {}", active.spin_id);
            return;
        }
        self.state.animation.active = None;

        match self.state.wheel.settle() {
            Ok(winner) => {
                let label = self.state.wheel.sectors()[winner].label.clone();
                self.state.history.push(SpinRecord {
                    spin_id,
                    winner,
                    label: label.clone(),
                    rotation_degrees: self.state.wheel.rotation_degrees(),
                    at: Local::now().format("%H:%M:%S").to_string(),
                });
                self.state.set_status(StatusKind::Success, format!("Winner: {label}"));
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Label editing
    // -----------------------------------------------------------------------

    pub fn toggle_edit_mode(&mut self) {
        match self.state.wheel.toggle_edit_mode() {
            Ok(true) => self
                .state
                .set_status(StatusKind::Info, "Edit mode: pick a sector, Enter to rename"),
            Ok(false) => self.state.status = None,
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn open_editor(&mut self) {
        let cursor = self.state.cursor;
        if let Err(e) = self.state.wheel.start_edit(cursor) {
            self.on_error(e.to_string());
        }
    }

    pub fn edit_input(&mut self, c: char) {
        if let Err(e) = self.state.wheel.edit_push_char(c) {
            self.on_error(e.to_string());
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Err(e) = self.state.wheel.edit_pop_char() {
            self.on_error(e.to_string());
        }
    }

    pub fn commit_edit(&mut self) {
        match self.state.wheel.commit_edit() {
            Ok(EditOutcome::Applied { index, .. }) => {
                let label = self.state.wheel.sectors()[index].label.clone();
                let text = format!("Renamed sector {}: {label}", index + 1);
                self.state.set_status(StatusKind::Success, text);
            }
            Ok(EditOutcome::Discarded { .. }) => {
                self.state.set_status(StatusKind::Info, "Empty name, nothing changed");
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.state.wheel.cancel_edit();
        self.state.status = None;
    }

    pub fn cursor_next(&mut self) {
        self.state.cursor_next();
    }

    pub fn cursor_prev(&mut self) {
        self.state.cursor_prev();
    }

    // -----------------------------------------------------------------------
    // Misc
    // -----------------------------------------------------------------------

    pub fn export_svg(&mut self) {
        let path = self.settings.svg_path.clone();
        let result = self.scene().and_then(|scene| export::save(&scene, &path));
        match result {
            Ok(()) => {
                info!("exported wheel to {}", path.display());
                self.state
                    .set_status(StatusKind::Success, format!("Saved {}", path.display()));
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn toggle_help(&mut self) {
        self.state.show_help = !self.state.show_help;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn on_error(&mut self, message: String) {
        error!("{message}");
        self.state.set_status(StatusKind::Error, message);
    }
}

pub fn build_wheel(settings: &AppSettings) -> Wheel {
    let wheel = match Wheel::new(&settings.labels, settings.spin) {
        Ok(wheel) => wheel,
        Err(e) => {
            warn!("falling back to default wheel: {e}");
            Wheel::with_defaults()
        }
    };
    wheel.with_palette(settings.palette.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn app() -> App {
        App::with_settings(AppSettings::default())
    }

    #[test]
    fn spin_then_settle_records_the_winner() {
        let mut app = app();
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = app.spin_with(&mut rng, Instant::now()).unwrap();
        assert!(app.is_animating());
        assert!(app.spin_with(&mut rng, Instant::now()).is_none());

        app.on_spin_settled(outcome.spin_id);
        assert!(!app.is_animating());
        let record = app.state.history.latest().expect("history entry");
        assert_eq!(record.spin_id, outcome.spin_id);
        assert_eq!(record.winner, wheel_core::resolve_winner(outcome.to, 8).unwrap());
        assert_eq!(app.state.status.as_ref().map(|s| s.kind), Some(StatusKind::Success));
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut app = app();
        let outcome = app.spin_with(&mut StdRng::seed_from_u64(1), Instant::now()).unwrap();
        app.on_spin_settled(outcome.spin_id + 1);
        assert!(app.is_animating());
        assert!(app.state.wheel.is_spinning());
    }

    #[test]
    fn input_mode_follows_state() {
        let mut app = app();
        assert_eq!(app.input_mode(), InputMode::Wheel);
        app.toggle_edit_mode();
        assert_eq!(app.input_mode(), InputMode::EditMode);
        app.open_editor();
        assert_eq!(app.input_mode(), InputMode::EditSession);
        app.cancel_edit();
        app.toggle_help();
        assert_eq!(app.input_mode(), InputMode::Help);
    }

    #[test]
    fn keyboard_edit_renames_the_cursor_sector() {
        let mut app = app();
        app.toggle_edit_mode();
        app.cursor_next();
        app.cursor_next();
        app.open_editor();
        for _ in 0.."Third Prize".len() {
            app.edit_backspace();
        }
        "Top Prize".chars().for_each(|c| app.edit_input(c));
        app.commit_edit();
        assert_eq!(app.state.wheel.sectors()[2].label, "Top Prize");
        assert_eq!(app.state.wheel.sectors()[3].label, "Fourth Prize");
    }

    #[test]
    fn toggling_edit_mode_while_spinning_reports_an_error() {
        let mut app = app();
        app.spin_with(&mut StdRng::seed_from_u64(8), Instant::now()).unwrap();
        app.toggle_edit_mode();
        assert!(!app.state.wheel.edit_mode());
        assert_eq!(app.state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn configured_labels_build_the_wheel() {
        let settings = AppSettings {
            labels: vec!["Tea".into(), "Coffee".into(), "Water".into()],
            ..AppSettings::default()
        };
        let app = App::with_settings(settings);
        assert_eq!(app.state.wheel.sectors().len(), 3);
        assert_eq!(app.scene().unwrap().sectors[1].label, "Coffee");
    }

    #[test]
    fn configured_palette_colours_the_scene() {
        let red = wheel_core::Rgb::new(0xFF, 0, 0);
        let settings = AppSettings {
            palette: wheel_core::Palette::new(vec![red]).unwrap(),
            ..AppSettings::default()
        };
        let scene = App::with_settings(settings).scene().unwrap();
        assert!(scene.sectors.iter().all(|s| s.fill == red));
    }

    #[test]
    fn display_rotation_lands_on_the_target() {
        let mut app = app();
        let start = Instant::now();
        let outcome = app.spin_with(&mut StdRng::seed_from_u64(2), start).unwrap();
        assert_eq!(app.display_rotation(start), 0.0);
        let after = start + outcome.duration + Duration::from_millis(1);
        assert_eq!(app.display_rotation(after), outcome.to);
    }

    #[test]
    fn export_writes_to_the_configured_path() {
        let path = std::env::temp_dir().join(format!("luckywheel-{}.svg", std::process::id()));
        let mut app =
            App::with_settings(AppSettings { svg_path: path.clone(), ..AppSettings::default() });
        app.export_svg();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}

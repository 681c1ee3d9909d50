use crate::editor::{EditOutcome, EditSession, LabelEditor};
use crate::spin::{SpinConfig, SpinOutcome, SpinPhase, Spinner, resolve_winner};
use crate::{DEFAULT_LABELS, Palette, Sector, WheelError, WheelResult, sectors_from_labels};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The whole widget state: sectors, cumulative rotation, spin phase and the
/// optional label edit.
#[derive(Debug, Clone)]
pub struct Wheel {
    sectors: Vec<Sector>,
    palette: Palette,
    rotation_degrees: f64,
    spinner: Spinner,
    editor: LabelEditor,
    edit_mode: bool,
}

/// Immutable copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub sectors: Vec<Sector>,
    pub palette: Palette,
    pub rotation_degrees: f64,
    pub phase: SpinPhase,
    pub config: SpinConfig,
    pub edit_mode: bool,
    pub edit_session: Option<EditSession>,
}

impl WheelSnapshot {
    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Sector currently under the pointer, from the settled rotation.
    pub fn winner(&self) -> WheelResult<usize> {
        resolve_winner(self.rotation_degrees, self.sectors.len())
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Wheel {
    pub fn new<S: AsRef<str>>(labels: &[S], config: SpinConfig) -> WheelResult<Self> {
        if labels.is_empty() {
            return Err(WheelError::NoSectors);
        }
        Ok(Self {
            sectors: sectors_from_labels(labels),
            palette: Palette::default(),
            rotation_degrees: 0.0,
            spinner: Spinner::new(config),
            editor: LabelEditor::default(),
            edit_mode: false,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            sectors: sectors_from_labels(&DEFAULT_LABELS),
            palette: Palette::default(),
            rotation_degrees: 0.0,
            spinner: Spinner::new(SpinConfig::default()),
            editor: LabelEditor::default(),
            edit_mode: false,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn phase(&self) -> SpinPhase {
        self.spinner.phase()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_spinning()
    }

    pub fn config(&self) -> &SpinConfig {
        self.spinner.config()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && !self.edit_mode && !self.editor.is_editing()
    }

    /// Spin the wheel. Ignored (returns `None`) while spinning, while edit mode
    /// is on, or while a label is being edited.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SpinOutcome> {
        if self.edit_mode || self.editor.is_editing() {
            debug!("spin ignored: editing labels");
            return None;
        }
        let outcome = self.spinner.spin(self.rotation_degrees, rng)?;
        self.rotation_degrees = outcome.to;
        Some(outcome)
    }

    /// Spin timer elapsed. Returns the winning sector index.
    pub fn settle(&mut self) -> WheelResult<usize> {
        self.spinner.settle();
        let winner = self.winner()?;
        info!("wheel settled on sector {winner} ({:?})", self.sectors[winner].label);
        Ok(winner)
    }

    pub fn winner(&self) -> WheelResult<usize> {
        resolve_winner(self.rotation_degrees, self.sectors.len())
    }

    /// Flip edit mode. Refused while spinning; switching it off drops any open session.
    pub fn toggle_edit_mode(&mut self) -> WheelResult<bool> {
        if self.is_spinning() {
            return Err(WheelError::Spinning);
        }
        self.edit_mode = !self.edit_mode;
        if !self.edit_mode {
            self.editor.cancel_edit();
        }
        Ok(self.edit_mode)
    }

    /// Open a label edit on `index`. Switches edit mode on; committing or
    /// cancelling switches it off again.
    pub fn start_edit(&mut self, index: usize) -> WheelResult<&EditSession> {
        let session = self.editor.start_edit(index, &self.sectors, self.spinner.phase())?;
        self.edit_mode = true;
        Ok(session)
    }

    pub fn edit_push_char(&mut self, c: char) -> WheelResult<()> {
        self.editor.push_char(c)
    }

    pub fn edit_pop_char(&mut self) -> WheelResult<()> {
        self.editor.pop_char()
    }

    pub fn edit_set_draft(&mut self, value: impl Into<String>) -> WheelResult<()> {
        self.editor.set_draft(value)
    }

    pub fn commit_edit(&mut self) -> WheelResult<EditOutcome> {
        let outcome = self.editor.commit_edit(&mut self.sectors);
        self.edit_mode = false;
        outcome
    }

    pub fn cancel_edit(&mut self) -> Option<EditSession> {
        self.edit_mode = false;
        self.editor.cancel_edit()
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            sectors: self.sectors.clone(),
            palette: self.palette.clone(),
            rotation_degrees: self.rotation_degrees,
            phase: self.spinner.phase(),
            config: *self.spinner.config(),
            edit_mode: self.edit_mode,
            edit_session: self.editor.session().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_wheel_has_eight_sectors() {
        let wheel = Wheel::default();
        assert_eq!(wheel.sectors().len(), 8);
        assert_eq!(wheel.rotation_degrees(), 0.0);
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert!(wheel.can_spin());
    }

    #[test]
    fn empty_label_list_is_rejected() {
        let labels: [&str; 0] = [];
        assert!(matches!(
            Wheel::new(&labels, SpinConfig::default()),
            Err(WheelError::NoSectors)
        ));
    }

    #[test]
    fn rotation_only_grows() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut wheel = Wheel::default();
        let mut last = wheel.rotation_degrees();
        for _ in 0..20 {
            wheel.spin(&mut rng).unwrap();
            assert!(wheel.rotation_degrees() > last);
            last = wheel.rotation_degrees();
            wheel.settle().unwrap();
        }
    }

    #[test]
    fn spin_while_spinning_keeps_rotation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut wheel = Wheel::default();
        wheel.spin(&mut rng).unwrap();
        let rotation = wheel.rotation_degrees();
        assert!(wheel.spin(&mut rng).is_none());
        assert_eq!(wheel.rotation_degrees(), rotation);
    }

    #[test]
    fn editing_is_blocked_while_spinning() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut wheel = Wheel::default();
        wheel.spin(&mut rng).unwrap();
        assert_eq!(wheel.toggle_edit_mode(), Err(WheelError::Spinning));
        wheel.settle().unwrap();
        assert_eq!(wheel.toggle_edit_mode(), Ok(true));
    }

    #[test]
    fn spin_is_blocked_in_edit_mode() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut wheel = Wheel::default();
        wheel.toggle_edit_mode().unwrap();
        assert!(!wheel.can_spin());
        assert!(wheel.spin(&mut rng).is_none());
        assert_eq!(wheel.rotation_degrees(), 0.0);
    }

    #[test]
    fn edit_scenario_through_the_wheel() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.start_edit(2).unwrap().draft, "Third Prize");
        assert!(wheel.edit_mode());
        assert!(!wheel.can_spin());
        wheel.edit_set_draft("Top Prize").unwrap();
        wheel.commit_edit().unwrap();
        assert!(!wheel.edit_mode());
        assert!(wheel.can_spin());

        let labels: Vec<_> = wheel.sectors().iter().map(|s| s.label.clone()).collect();
        for (idx, label) in labels.iter().enumerate() {
            if idx == 2 {
                assert_eq!(label, "Top Prize");
            } else {
                assert_eq!(label, DEFAULT_LABELS[idx]);
            }
        }
    }

    #[test]
    fn leaving_edit_mode_drops_the_session() {
        let mut wheel = Wheel::default();
        wheel.toggle_edit_mode().unwrap();
        wheel.start_edit(5).unwrap();
        wheel.edit_push_char('!').unwrap();
        assert_eq!(wheel.toggle_edit_mode(), Ok(false));
        assert!(wheel.edit_session().is_none());
        assert_eq!(wheel.sectors()[5].label, "Sixth Prize");
    }

    #[test]
    fn cancelling_an_edit_leaves_edit_mode() {
        let mut wheel = Wheel::default();
        wheel.start_edit(1).unwrap();
        wheel.edit_set_draft("never saved").unwrap();
        assert!(wheel.cancel_edit().is_some());
        assert!(!wheel.edit_mode());
        assert_eq!(wheel.sectors()[1].label, "Second Prize");
    }

    #[test]
    fn start_edit_is_refused_while_spinning() {
        let mut wheel = Wheel::default();
        wheel.spin(&mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(wheel.start_edit(0).unwrap_err(), WheelError::Spinning);
        assert!(!wheel.edit_mode());
    }

    #[test]
    fn snapshot_is_detached_from_later_mutations() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut wheel = Wheel::default();
        let before = wheel.snapshot();
        wheel.spin(&mut rng).unwrap();
        let during = wheel.snapshot();
        assert_eq!(before.rotation_degrees, 0.0);
        assert!(!before.is_spinning());
        assert!(during.is_spinning());
        assert_eq!(during.rotation_degrees, wheel.rotation_degrees());
        assert_eq!(during.winner(), wheel.winner());
    }

    #[test]
    fn settle_reports_the_winner() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut wheel = Wheel::default();
        let outcome = wheel.spin(&mut rng).unwrap();
        let winner = wheel.settle().unwrap();
        assert_eq!(winner, resolve_winner(outcome.to, 8).unwrap());
        assert!(!wheel.is_spinning());
    }
}

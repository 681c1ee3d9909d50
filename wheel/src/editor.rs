use crate::spin::SpinPhase;
use crate::{Sector, WheelError, WheelResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// An open label edit: which sector, and what has been typed so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    pub target_index: usize,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied { index: usize, previous: String },
    /// Draft was blank after trimming; the label was left alone.
    Discarded { index: usize },
}

/// Holds at most one edit session at a time.
#[derive(Debug, Clone, Default)]
pub struct LabelEditor {
    session: Option<EditSession>,
}

impl LabelEditor {
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session on `index`, seeded with the current label. A second
    /// session is refused until the first is committed or cancelled.
    pub fn start_edit(
        &mut self,
        index: usize,
        sectors: &[Sector],
        phase: SpinPhase,
    ) -> WheelResult<&EditSession> {
        if phase == SpinPhase::Spinning {
            return Err(WheelError::Spinning);
        }
        if let Some(open) = &self.session {
            return Err(WheelError::EditInProgress { index: open.target_index });
        }
        let sector = sectors.get(index).ok_or(WheelError::SectorOutOfRange {
            index,
            total: sectors.len(),
        })?;

        debug!("editing sector {index} ({:?})", sector.label);
        Ok(self.session.insert(EditSession {
            target_index: index,
            draft: sector.label.clone(),
        }))
    }

    fn session_mut(&mut self) -> WheelResult<&mut EditSession> {
        self.session.as_mut().ok_or(WheelError::NoEditSession)
    }

    pub fn set_draft(&mut self, value: impl Into<String>) -> WheelResult<()> {
        self.session_mut()?.draft = value.into();
        Ok(())
    }

    pub fn push_char(&mut self, c: char) -> WheelResult<()> {
        self.session_mut()?.draft.push(c);
        Ok(())
    }

    pub fn pop_char(&mut self) -> WheelResult<()> {
        self.session_mut()?.draft.pop();
        Ok(())
    }

    /// Close the session and apply the draft if it has any non-whitespace
    /// content. The label is stored exactly as typed.
    pub fn commit_edit(&mut self, sectors: &mut [Sector]) -> WheelResult<EditOutcome> {
        let session = self.session.take().ok_or(WheelError::NoEditSession)?;
        let index = session.target_index;

        if session.draft.trim().is_empty() {
            debug!("blank label for sector {index} discarded");
            return Ok(EditOutcome::Discarded { index });
        }

        let total = sectors.len();
        let sector = sectors
            .get_mut(index)
            .ok_or(WheelError::SectorOutOfRange { index, total })?;
        let previous = std::mem::replace(&mut sector.label, session.draft);
        info!("sector {index} renamed {previous:?} -> {:?}", sector.label);
        Ok(EditOutcome::Applied { index, previous })
    }

    /// Drop the session without touching any label.
    pub fn cancel_edit(&mut self) -> Option<EditSession> {
        let dropped = self.session.take();
        if let Some(s) = &dropped {
            debug!("edit of sector {} cancelled", s.target_index);
        }
        dropped
    }
}

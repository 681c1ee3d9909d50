use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
    /// The settle timer for spin `spin_id` has elapsed.
    SpinSettled { spin_id: u64 },
}

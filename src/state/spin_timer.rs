use crate::state::messages::UiEvent;
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Fires once, `duration` after a spin starts, to move the wheel back to idle.
/// The duration comes from the same `SpinConfig` the animation is eased over.
pub struct SpinTimer {
    ui_events: mpsc::Sender<UiEvent>,
    spin_id: u64,
    duration: Duration,
}

impl SpinTimer {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, spin_id: u64, duration: Duration) -> Self {
        Self { ui_events, spin_id, duration }
    }

    pub async fn run(self) {
        sleep(self.duration).await;
        debug!("spin {} timer elapsed", self.spin_id);
        let _ = self
            .ui_events
            .send(UiEvent::SpinSettled { spin_id: self.spin_id })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    #[tokio::test]
    async fn sends_settled_after_the_duration() {
        let (tx, mut rx) = mpsc::channel(4);
        let started = Instant::now();
        tokio::spawn(SpinTimer::new(tx, 7, Duration::from_millis(20)).run());

        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timer fired")
            .expect("channel open");
        assert!(matches!(event, UiEvent::SpinSettled { spin_id: 7 }));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn closed_channel_is_not_an_error() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        SpinTimer::new(tx, 1, Duration::ZERO).run().await;
    }
}

//! Render model derived from a [`WheelSnapshot`].
//!
//! A scene carries everything a drawing surface needs, already laid out:
//! one outline/colour/label triple per sector, the whole-wheel rotation and the
//! transition to animate it with. Surfaces never look at the wheel itself.

use crate::easing::CubicBezier;
use crate::geometry::{LabelAnchor, PathSpec, Point, label_anchor, sector_outline};
use crate::spin::SpinPhase;
use crate::wheel::WheelSnapshot;
use crate::{Rgb, WheelResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wheel radius, in scene units.
pub const DEFAULT_RADIUS: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorShape {
    pub index: usize,
    pub label: String,
    pub outline: PathSpec,
    pub fill: Rgb,
    pub anchor: LabelAnchor,
}

/// Timed transition applied to the whole-wheel rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl Transition {
    pub fn to_css(&self) -> String {
        format!("transform {}s {}", self.duration.as_secs_f64(), self.easing.to_css())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelScene {
    pub radius: f64,
    pub center: Point,
    pub rotation_degrees: f64,
    /// Only present while a spin is running.
    pub transition: Option<Transition>,
    pub sectors: Vec<SectorShape>,
    pub highlighted: Option<usize>,
}

impl WheelScene {
    pub fn size(&self) -> f64 {
        self.radius * 2.0
    }
}

pub fn render(snapshot: &WheelSnapshot, radius: f64) -> WheelResult<WheelScene> {
    let total = snapshot.sectors.len();
    let sectors = snapshot
        .sectors
        .iter()
        .enumerate()
        .map(|(index, sector)| {
            Ok(SectorShape {
                index,
                label: sector.label.clone(),
                outline: sector_outline(index, total, radius)?,
                fill: snapshot.palette.color_for(sector.color_index),
                anchor: label_anchor(index, total, radius)?,
            })
        })
        .collect::<WheelResult<Vec<_>>>()?;

    let transition = match snapshot.phase {
        SpinPhase::Spinning => Some(Transition {
            duration: snapshot.config.duration,
            easing: snapshot.config.easing,
        }),
        SpinPhase::Idle => None,
    };

    Ok(WheelScene {
        radius,
        center: Point::new(radius, radius),
        rotation_degrees: snapshot.rotation_degrees,
        transition,
        sectors,
        highlighted: snapshot.edit_session.as_ref().map(|s| s.target_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::Wheel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn idle_scene_has_no_transition() {
        let scene = render(&Wheel::default().snapshot(), DEFAULT_RADIUS).unwrap();
        assert_eq!(scene.sectors.len(), 8);
        assert_eq!(scene.center, Point::new(200.0, 200.0));
        assert!(scene.transition.is_none());
        assert_eq!(scene.sectors[0].fill, Rgb::from_u32(0x4299E1));
        assert_eq!(scene.sectors[4].label, "Fifth Prize");
        assert_eq!(scene.highlighted, None);
    }

    #[test]
    fn spinning_scene_carries_the_configured_transition() {
        let mut wheel = Wheel::default();
        wheel.spin(&mut StdRng::seed_from_u64(2)).unwrap();
        let scene = render(&wheel.snapshot(), 100.0).unwrap();
        let transition = scene.transition.expect("spinning scene has a transition");
        assert_eq!(transition.duration, wheel.config().duration);
        assert_eq!(
            transition.to_css(),
            "transform 5s cubic-bezier(0.17, 0.67, 0.12, 0.99)"
        );
        assert_eq!(scene.rotation_degrees, wheel.rotation_degrees());
    }

    #[test]
    fn colours_wrap_for_large_wheels() {
        let labels: Vec<String> = (0..12).map(|i| format!("P{i}")).collect();
        let wheel = Wheel::new(&labels, Default::default()).unwrap();
        let scene = render(&wheel.snapshot(), 50.0).unwrap();
        assert_eq!(scene.sectors[9].fill, scene.sectors[1].fill);
    }

    #[test]
    fn edited_sector_is_highlighted() {
        let mut wheel = Wheel::default();
        wheel.toggle_edit_mode().unwrap();
        wheel.start_edit(6).unwrap();
        let scene = render(&wheel.snapshot(), 50.0).unwrap();
        assert_eq!(scene.highlighted, Some(6));
    }

    #[test]
    fn scene_serializes_to_json() {
        let scene = render(&Wheel::default().snapshot(), 10.0).unwrap();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["sectors"].as_array().map(Vec::len), Some(8));
        assert_eq!(json["radius"], 10.0);
    }
}

//! Sector layout math.
//!
//! All coordinates are in the wheel's own frame: the centre sits at
//! `(radius, radius)`, `y` grows downwards, angle 0 points straight up and
//! angles grow clockwise. Every function here is pure.

use crate::{WheelError, WheelResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Distance of a label anchor from the centre, as a fraction of the radius.
pub const LABEL_RADIUS_FRACTION: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotate clockwise (on screen) about `center` by `degrees`.
    pub fn rotated_about(&self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    }
}

/// One drawing command of a sector outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep_clockwise: bool,
        end: Point,
    },
    Close,
}

/// Outline of a single sector: centre, line out, arc along the rim, back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    pub commands: Vec<PathCommand>,
}

impl PathSpec {
    /// Serialize as SVG path data (`d` attribute).
    pub fn to_path_data(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
                PathCommand::ArcTo { radius, large_arc, sweep_clockwise, end } => write!(
                    out,
                    "A{radius},{radius} 0 {} {} {},{}",
                    u8::from(*large_arc),
                    u8::from(*sweep_clockwise),
                    end.x,
                    end.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }

    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            PathCommand::LineTo(p) => Some(*p),
            _ => None,
        })
    }

    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|c| match c {
            PathCommand::ArcTo { end, .. } => Some(*end),
            _ => None,
        })
    }
}

/// Where a label is drawn and how far it is turned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub rotation_degrees: f64,
}

impl LabelAnchor {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Start and end angle of a sector in wheel degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorSpan {
    pub start_degrees: f64,
    pub end_degrees: f64,
}

impl SectorSpan {
    pub fn sweep(&self) -> f64 {
        self.end_degrees - self.start_degrees
    }

    pub fn bisector(&self) -> f64 {
        (self.start_degrees + self.end_degrees) / 2.0
    }
}

pub fn angular_step(total: usize) -> WheelResult<f64> {
    if total == 0 {
        return Err(WheelError::NoSectors);
    }
    Ok(360.0 / total as f64)
}

fn check_sector(index: usize, total: usize) -> WheelResult<f64> {
    let step = angular_step(total)?;
    if index >= total {
        return Err(WheelError::SectorOutOfRange { index, total });
    }
    Ok(step)
}

fn check_radius(radius: f64) -> WheelResult<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(WheelError::InvalidRadius(radius))
    }
}

pub fn sector_span(index: usize, total: usize) -> WheelResult<SectorSpan> {
    let step = check_sector(index, total)?;
    Ok(SectorSpan {
        start_degrees: index as f64 * step,
        end_degrees: (index + 1) as f64 * step,
    })
}

/// Point on a circle for a wheel angle (0 = up, clockwise).
pub fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let (sin, cos) = (degrees - 90.0).to_radians().sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

/// Index of the sector covering a wheel angle. Angles outside `[0, 360)` are
/// normalised first.
pub fn sector_at_angle(degrees: f64, total: usize) -> WheelResult<usize> {
    let step = angular_step(total)?;
    let idx = (degrees.rem_euclid(360.0) / step).floor() as usize;
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    Ok(idx.min(total - 1))
}

pub fn sector_outline(index: usize, total: usize, radius: f64) -> WheelResult<PathSpec> {
    check_radius(radius)?;
    let span = sector_span(index, total)?;
    let center = Point::new(radius, radius);
    let start = point_on_circle(center, radius, span.start_degrees);
    let end = point_on_circle(center, radius, span.end_degrees);

    Ok(PathSpec {
        commands: vec![
            PathCommand::MoveTo(center),
            PathCommand::LineTo(start),
            PathCommand::ArcTo {
                radius,
                large_arc: span.sweep() > 180.0,
                sweep_clockwise: true,
                end,
            },
            PathCommand::Close,
        ],
    })
}

pub fn label_anchor(index: usize, total: usize, radius: f64) -> WheelResult<LabelAnchor> {
    check_radius(radius)?;
    let span = sector_span(index, total)?;
    let center = Point::new(radius, radius);
    let bisector = span.bisector();
    let p = point_on_circle(center, radius * LABEL_RADIUS_FRACTION, bisector);
    Ok(LabelAnchor { x: p.x, y: p.y, rotation_degrees: bisector })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        a.distance_to(&b) < EPS
    }

    #[test]
    fn four_sector_quadrant_matches_top_to_right() {
        let path = sector_outline(0, 4, 200.0).unwrap();
        assert_eq!(path.commands[0], PathCommand::MoveTo(Point::new(200.0, 200.0)));
        assert!(close(path.start_point().unwrap(), Point::new(200.0, 0.0)));
        assert!(close(path.end_point().unwrap(), Point::new(400.0, 200.0)));
        match path.commands[2] {
            PathCommand::ArcTo { radius, large_arc, sweep_clockwise, .. } => {
                assert_eq!(radius, 200.0);
                assert!(!large_arc);
                assert!(sweep_clockwise);
            }
            other => panic!("expected arc, got {other:?}"),
        }
        assert_eq!(path.commands[3], PathCommand::Close);
    }

    #[test]
    fn adjacent_sectors_share_boundaries() {
        for total in 1..=24 {
            let mut swept = 0.0;
            for idx in 0..total {
                let span = sector_span(idx, total).unwrap();
                swept += span.sweep();
                let path = sector_outline(idx, total, 150.0).unwrap();
                let next = sector_outline((idx + 1) % total, total, 150.0).unwrap();
                assert!(
                    close(path.end_point().unwrap(), next.start_point().unwrap()),
                    "gap between sector {idx} and its successor for total {total}"
                );
            }
            assert!((swept - 360.0).abs() < EPS);
        }
    }

    #[test]
    fn only_a_single_sector_uses_the_large_arc() {
        let single = sector_outline(0, 1, 10.0).unwrap();
        assert!(matches!(single.commands[2], PathCommand::ArcTo { large_arc: true, .. }));
        let pair = sector_outline(1, 2, 10.0).unwrap();
        assert!(matches!(pair.commands[2], PathCommand::ArcTo { large_arc: false, .. }));
    }

    #[test]
    fn label_anchor_sits_at_sixty_five_percent() {
        let center = Point::new(120.0, 120.0);
        for total in 1..=16 {
            for idx in 0..total {
                let anchor = label_anchor(idx, total, 120.0).unwrap();
                let d = anchor.point().distance_to(&center);
                assert!((d - 78.0).abs() < 1e-9, "anchor {idx}/{total} at {d}");
            }
        }
    }

    #[test]
    fn label_anchor_rotation_is_the_bisector() {
        let anchor = label_anchor(1, 8, 200.0).unwrap();
        assert!((anchor.rotation_degrees - 67.5).abs() < EPS);
        let top = label_anchor(0, 1, 100.0).unwrap();
        assert!(close(top.point(), Point::new(100.0, 165.0)));
        assert_eq!(top.rotation_degrees, 180.0);
    }

    #[test]
    fn zero_sectors_and_bad_input_are_errors() {
        assert_eq!(sector_outline(0, 0, 10.0), Err(WheelError::NoSectors));
        assert_eq!(
            label_anchor(4, 4, 10.0),
            Err(WheelError::SectorOutOfRange { index: 4, total: 4 })
        );
        assert_eq!(sector_outline(0, 4, 0.0), Err(WheelError::InvalidRadius(0.0)));
    }

    #[test]
    fn path_data_renders_svg_syntax() {
        let d = sector_outline(0, 2, 10.0).unwrap().to_path_data();
        assert!(d.starts_with("M10,10 L10,0 A10,10 0 0 1 "), "{d}");
        assert!(d.ends_with(" Z"));
    }

    #[test]
    fn angle_lookup_normalises() {
        assert_eq!(sector_at_angle(0.0, 8).unwrap(), 0);
        assert_eq!(sector_at_angle(359.9, 8).unwrap(), 7);
        assert_eq!(sector_at_angle(-1.0, 8).unwrap(), 7);
        assert_eq!(sector_at_angle(405.0, 8).unwrap(), 1);
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let c = Point::new(0.0, 0.0);
        let up = Point::new(0.0, -1.0);
        assert!(close(up.rotated_about(c, 90.0), Point::new(1.0, 0.0)));
    }
}

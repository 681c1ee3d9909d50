//! SVG rendering of a [`WheelScene`].

use crate::scene::WheelScene;
use crate::{Rgb, WheelError, WheelResult};
use log::debug;
use std::path::Path as FsPath;
use svg::Document;
use svg::node::element::{Group, Path, Polygon, Text};

const STROKE_WIDTH: u32 = 2;
const LABEL_FONT_SIZE: u32 = 16;
const HIGHLIGHT_STROKE: Rgb = Rgb::from_u32(0xF6E05E);
const POINTER_FILL: Rgb = Rgb::from_u32(0xEF4444);
const POINTER_HALF_WIDTH: f64 = 8.0;
const POINTER_HEIGHT: f64 = 32.0;

fn sector_group(scene: &WheelScene) -> Group {
    let mut group = Group::new();
    for shape in &scene.sectors {
        let highlighted = scene.highlighted == Some(shape.index);
        let stroke = if highlighted { HIGHLIGHT_STROKE } else { Rgb::WHITE };

        let path = Path::new()
            .set("d", shape.outline.to_path_data())
            .set("fill", shape.fill.to_hex())
            .set("stroke", stroke.to_hex())
            .set("stroke-width", STROKE_WIDTH);

        let a = shape.anchor;
        let label = Text::new(shape.label.clone())
            .set("x", a.x)
            .set("y", a.y)
            .set("fill", Rgb::WHITE.to_hex())
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-weight", "bold")
            .set("text-anchor", "middle")
            .set("transform", format!("rotate({}, {}, {})", a.rotation_degrees, a.x, a.y));

        group = group.add(Group::new().add(path).add(label));
    }
    group
}

/// Build the document. The sector group turns about the wheel centre by the
/// scene rotation; the pointer stays fixed at the top.
pub fn to_document(scene: &WheelScene) -> Document {
    let size = scene.size();
    let c = scene.center;

    let mut wheel = sector_group(scene).set(
        "transform",
        format!("rotate({}, {}, {})", scene.rotation_degrees, c.x, c.y),
    );
    if let Some(transition) = scene.transition {
        wheel = wheel.set("style", format!("transition: {}", transition.to_css()));
    }

    let pointer = Polygon::new()
        .set(
            "points",
            format!(
                "{},{} {},{} {},{}",
                c.x,
                POINTER_HEIGHT,
                c.x - POINTER_HALF_WIDTH,
                0.0,
                c.x + POINTER_HALF_WIDTH,
                0.0
            ),
        )
        .set("fill", POINTER_FILL.to_hex());

    Document::new()
        .set("viewBox", format!("0 0 {size} {size}"))
        .set("width", size)
        .set("height", size)
        .add(wheel)
        .add(pointer)
}

pub fn to_svg_string(scene: &WheelScene) -> String {
    to_document(scene).to_string()
}

pub fn save(scene: &WheelScene, path: impl AsRef<FsPath>) -> WheelResult<()> {
    let path = path.as_ref();
    debug!("writing wheel svg to {}", path.display());
    svg::save(path, &to_document(scene))
        .map_err(|e| WheelError::Export(format!("{}: {e}", path.display())))
}

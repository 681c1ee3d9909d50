use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::Span;
use tui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use tui::widgets::{Block, Widget};
use wheel_core::geometry::{Point, point_on_circle, sector_at_angle};
use wheel_core::scene::WheelScene;
use wheel_core::Rgb;

/// Braille dots per terminal cell.
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;
/// Room left around the rim for the pointer.
const MARGIN: f64 = 1.12;
const MAX_LABEL_CHARS: usize = 12;
const POINTER: &str = "▼";

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// The wheel drawn on a braille canvas, turned by `rotation_degrees`.
pub struct WheelView<'a> {
    pub scene: &'a WheelScene,
    pub rotation_degrees: f64,
    /// Sector under the edit cursor.
    pub cursor: Option<usize>,
    /// Sector to call out once the wheel has settled.
    pub winner: Option<usize>,
    pub block: Option<Block<'a>>,
}

/// Canvas bounds that keep the wheel round for an area of `width` x `height`
/// cells. Braille dots are close enough to square that equal units per dot
/// on both axes gives a circle.
pub fn canvas_bounds(width: u16, height: u16, radius: f64) -> ([f64; 2], [f64; 2]) {
    let dots_w = (f64::from(width) * DOTS_X).max(1.0);
    let dots_h = (f64::from(height) * DOTS_Y).max(1.0);
    let units_per_dot = 2.0 * radius * MARGIN / dots_w.min(dots_h);
    let half_w = dots_w * units_per_dot / 2.0;
    let half_h = dots_h * units_per_dot / 2.0;
    ([-half_w, half_w], [-half_h, half_h])
}

/// Wheel-frame point (centre at `(r, r)`, y down) to canvas space (centre at
/// the origin, y up).
fn to_canvas(p: Point, center: Point) -> (f64, f64) {
    (p.x - center.x, center.y - p.y)
}

/// Screen angle of a canvas point: 0 straight up, growing clockwise.
fn screen_angle(x: f64, y: f64) -> f64 {
    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Which sector covers a canvas point once the wheel is turned clockwise by
/// `rotation` degrees.
pub fn sector_at_point(x: f64, y: f64, rotation: f64, total: usize) -> Option<usize> {
    sector_at_angle(screen_angle(x, y) - rotation, total).ok()
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut out: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    out.push('…');
    out
}

impl WheelView<'_> {
    /// Braille dot coordinates inside the rim, bucketed by sector.
    fn fill_points(
        &self,
        x_bounds: [f64; 2],
        y_bounds: [f64; 2],
        area: Rect,
    ) -> Vec<Vec<(f64, f64)>> {
        let total = self.scene.sectors.len();
        let mut buckets = vec![Vec::new(); total];
        let cols = (f64::from(area.width) * DOTS_X) as usize;
        let rows = (f64::from(area.height) * DOTS_Y) as usize;
        if cols == 0 || rows == 0 || total == 0 {
            return buckets;
        }
        let dx = (x_bounds[1] - x_bounds[0]) / cols as f64;
        let dy = (y_bounds[1] - y_bounds[0]) / rows as f64;
        let r2 = self.scene.radius * self.scene.radius;

        for row in 0..rows {
            let y = y_bounds[0] + (row as f64 + 0.5) * dy;
            for col in 0..cols {
                let x = x_bounds[0] + (col as f64 + 0.5) * dx;
                if x * x + y * y > r2 {
                    continue;
                }
                if let Some(idx) = sector_at_point(x, y, self.rotation_degrees, total) {
                    buckets[idx].push((x, y));
                }
            }
        }
        buckets
    }

    fn paint(&self, ctx: &mut Context, buckets: &[Vec<(f64, f64)>], half_cell: f64) {
        let scene = self.scene;
        let center = scene.center;

        for (shape, coords) in scene.sectors.iter().zip(buckets) {
            let color = if self.cursor == Some(shape.index) {
                Color::Yellow
            } else {
                to_color(shape.fill)
            };
            ctx.draw(&Points { coords, color });
        }
        ctx.layer();

        let total = scene.sectors.len();
        for idx in 0..total {
            let start = idx as f64 * 360.0 / total as f64 + self.rotation_degrees;
            let (x2, y2) = to_canvas(point_on_circle(center, scene.radius, start), center);
            ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2, y2, color: Color::White });
        }
        ctx.draw(&Circle { x: 0.0, y: 0.0, radius: scene.radius, color: Color::White });
        ctx.layer();

        for shape in &scene.sectors {
            let anchor = shape.anchor.point().rotated_about(center, self.rotation_degrees);
            let (x, y) = to_canvas(anchor, center);
            let text = truncate_label(&shape.label);
            let mut style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            if self.winner == Some(shape.index) {
                style = style.fg(Color::Black).bg(Color::Yellow);
            } else if self.cursor == Some(shape.index) {
                style = style.fg(Color::Black);
            }
            let offset = text.chars().count() as f64 * half_cell;
            ctx.print(x - offset, y, Span::styled(text, style));
        }

        ctx.print(
            -half_cell,
            scene.radius * (1.0 + MARGIN) / 2.0,
            Span::styled(POINTER, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );
    }
}

impl Widget for WheelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if inner.width < 4 || inner.height < 2 {
            return;
        }

        let (x_bounds, y_bounds) = canvas_bounds(inner.width, inner.height, self.scene.radius);
        let buckets = self.fill_points(x_bounds, y_bounds, inner);
        // Half a character cell in canvas units, for centring text on a point.
        let half_cell = (x_bounds[1] - x_bounds[0]) / f64::from(inner.width) / 2.0;

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| self.paint(ctx, &buckets, half_cell));
        if let Some(block) = self.block.clone() {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}

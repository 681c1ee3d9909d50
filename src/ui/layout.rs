use tui::layout::{Constraint, Layout, Rect, Size};

pub const STATUS_BAR_HEIGHT: u16 = 3;
pub const SIDE_PANEL_WIDTH: u16 = 36;
pub const LOG_PANE_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAreas {
    pub wheel: Rect,
    pub side_panel: Option<Rect>,
    pub status_bar: Option<Rect>,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        if full_screen {
            return LayoutAreas { wheel: area, side_panel: None, status_bar: None, logs: None };
        }

        let log_height = if show_logs { LOG_PANE_HEIGHT } else { 0 };
        let [body, logs, status] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        // Narrow terminals give the whole width to the wheel.
        let (wheel, side_panel) = if body.width >= SIDE_PANEL_WIDTH * 2 {
            let [wheel, side] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDE_PANEL_WIDTH)])
                    .areas(body);
            (wheel, Some(side))
        } else {
            (body, None)
        };

        LayoutAreas {
            wheel,
            side_panel,
            status_bar: Some(status),
            logs: show_logs.then_some(logs),
        }
    }
}
